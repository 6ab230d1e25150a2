use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::calculator::compute_calorie_target;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    WeightLoss,
    WeightGain,
    Maintenance,
}

impl Goal {
    pub const fn as_str(self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight-loss",
            Goal::WeightGain => "weight-gain",
            Goal::Maintenance => "maintenance",
        }
    }

    /// "weight-loss" -> "weight loss"
    pub fn human(self) -> String {
        self.as_str().replace('-', " ")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DietPreference {
    Vegetarian,
    NonVegetarian,
    Eggetarian,
}

impl DietPreference {
    pub const fn as_str(self) -> &'static str {
        match self {
            DietPreference::Vegetarian => "vegetarian",
            DietPreference::NonVegetarian => "non-vegetarian",
            DietPreference::Eggetarian => "eggetarian",
        }
    }
}

/// Validated biometric and preference input. Numeric fields are finite and positive.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub diet_preference: DietPreference,
    pub diet_style: String,
    pub allergies: Option<String>,
    pub exclude: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Macronutrients {
    pub protein: i64,
    pub carbs: i64,
    pub fats: i64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTargets {
    /// kcal/day, unrounded
    pub calories: f64,
    pub macros: Macronutrients,
    pub water_liters: f64,
}

impl NutritionTargets {
    /// Whole kcal/day as shown to users and sent to the model.
    pub fn rounded_calories(&self) -> i64 {
        self.calories.round() as i64
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Please enter valid numbers for age, height, and weight.")]
    NotNumeric(&'static str),
    #[error("{0} must be a positive number")]
    OutOfRange(&'static str),
    #[error("These measurements do not give a positive daily calorie target.")]
    NoEnergyBudget,
}

/// A form value that may arrive as a JSON number or as the raw text of an input box.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    fn parse(field: Option<&NumericField>, name: &'static str) -> Result<f64, ProfileError> {
        let value = match field {
            Some(NumericField::Number(n)) => *n,
            Some(NumericField::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ProfileError::NotNumeric(name))?,
            None => return Err(ProfileError::NotNumeric(name)),
        };
        if value.is_nan() {
            return Err(ProfileError::NotNumeric(name));
        }
        if !value.is_finite() || value <= 0.0 {
            return Err(ProfileError::OutOfRange(name));
        }
        Ok(value)
    }
}

/// Raw submission as posted by the diet form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[serde(default)]
    pub age: Option<NumericField>,
    pub gender: Gender,
    #[serde(default)]
    pub height: Option<NumericField>,
    #[serde(default)]
    pub weight: Option<NumericField>,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub diet_preference: DietPreference,
    #[serde(default = "default_diet_style")]
    pub diet_style: String,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub exclude: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

fn default_diet_style() -> String {
    "North Indian".into()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<ProfileForm> for UserProfile {
    type Error = ProfileError;

    fn try_from(form: ProfileForm) -> Result<Self, Self::Error> {
        let age = NumericField::parse(form.age.as_ref(), "age")?.trunc();
        let height_cm = NumericField::parse(form.height.as_ref(), "height")?;
        let weight_kg = NumericField::parse(form.weight.as_ref(), "weight")?;

        // integer ages only; 0.5 truncates to 0
        if age < 1.0 || age > f64::from(u32::MAX) {
            return Err(ProfileError::OutOfRange("age"));
        }

        let diet_style = match form.diet_style.trim() {
            "" => default_diet_style(),
            style => style.to_string(),
        };

        let profile = UserProfile {
            age: age as u32,
            gender: form.gender,
            height_cm,
            weight_kg,
            activity_level: form.activity_level,
            goal: form.goal,
            diet_preference: form.diet_preference,
            diet_style,
            allergies: non_blank(form.allergies),
            exclude: non_blank(form.exclude),
            comments: non_blank(form.comments),
        };

        // each field can be plausible alone while the combination is not
        let calories = compute_calorie_target(&profile);
        if !calories.is_finite() || calories <= 0.0 {
            return Err(ProfileError::NoEnergyBudget);
        }
        Ok(profile)
    }
}
