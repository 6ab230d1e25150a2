//! Baseline daily targets from biometric input.
//!
//! Pure functions, no I/O. Inputs are assumed validated (see `UserProfile`);
//! pathological values produce non-physical numbers rather than errors.

use super::dto::{ActivityLevel, Gender, Goal, Macronutrients, NutritionTargets, UserProfile};

const PROTEIN_KCAL_PER_G: f64 = 4.0;
const CARBS_KCAL_PER_G: f64 = 4.0;
const FATS_KCAL_PER_G: f64 = 9.0;

const WATER_ML_PER_KG: f64 = 35.0;

const GOAL_ADJUSTMENT_KCAL: f64 = 500.0;

impl ActivityLevel {
    pub const fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Share of total calories per macronutrient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroRatio {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl Goal {
    pub const fn macro_ratio(self) -> MacroRatio {
        match self {
            Goal::WeightLoss => MacroRatio { protein: 0.40, carbs: 0.30, fats: 0.30 },
            Goal::Maintenance => MacroRatio { protein: 0.30, carbs: 0.40, fats: 0.30 },
            Goal::WeightGain => MacroRatio { protein: 0.30, carbs: 0.50, fats: 0.20 },
        }
    }

    const fn calorie_adjustment(self) -> f64 {
        match self {
            Goal::WeightLoss => -GOAL_ADJUSTMENT_KCAL,
            Goal::WeightGain => GOAL_ADJUSTMENT_KCAL,
            Goal::Maintenance => 0.0,
        }
    }
}

/// Basal metabolic rate in kcal/day (revised Harris-Benedict coefficients).
pub fn compute_bmr(profile: &UserProfile) -> f64 {
    let age = f64::from(profile.age);
    let weight = profile.weight_kg;
    let height = profile.height_cm;
    match profile.gender {
        Gender::Male => 88.362 + 13.397 * weight + 4.799 * height - 5.677 * age,
        Gender::Female => 447.593 + 9.247 * weight + 3.098 * height - 4.330 * age,
    }
}

/// TDEE adjusted for the goal. Not rounded.
pub fn compute_calorie_target(profile: &UserProfile) -> f64 {
    let tdee = compute_bmr(profile) * profile.activity_level.factor();
    tdee + profile.goal.calorie_adjustment()
}

/// Gram targets per macronutrient. Each value is rounded independently
/// (half away from zero), so the grams need not add back up to `calories`.
pub fn compute_macros(calories: f64, goal: Goal) -> Macronutrients {
    let ratio = goal.macro_ratio();
    Macronutrients {
        protein: grams(calories * ratio.protein, PROTEIN_KCAL_PER_G),
        carbs: grams(calories * ratio.carbs, CARBS_KCAL_PER_G),
        fats: grams(calories * ratio.fats, FATS_KCAL_PER_G),
    }
}

fn grams(kcal: f64, kcal_per_gram: f64) -> i64 {
    (kcal / kcal_per_gram).round() as i64
}

/// Daily water in liters at 35 ml/kg, rounded to one decimal.
pub fn compute_water_target(weight_kg: f64) -> f64 {
    let liters = weight_kg * WATER_ML_PER_KG / 1000.0;
    (liters * 10.0).round() / 10.0
}

pub fn compute_targets(profile: &UserProfile) -> NutritionTargets {
    let calories = compute_calorie_target(profile);
    NutritionTargets {
        calories,
        macros: compute_macros(calories, profile.goal),
        water_liters: compute_water_target(profile.weight_kg),
    }
}
