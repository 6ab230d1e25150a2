use lazy_static::lazy_static;
use regex::Regex;

use crate::nutrition::dto::{NutritionTargets, UserProfile};

pub const NOT_SPECIFIED: &str = "None specified";

/// Class names the nutrition summary block must use.
pub const SUMMARY_CONTAINER_CLASS: &str = "nutrition-summary";
pub const SUMMARY_ITEM_CLASS: &str = "summary-item";

lazy_static! {
    static ref LEADING_FENCE: Regex = Regex::new(r"^```(?:html)?").expect("valid regex");
    static ref TRAILING_FENCE: Regex = Regex::new(r"```$").expect("valid regex");
}

fn or_placeholder(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_SPECIFIED)
}

/// The summary block the model is asked to reproduce verbatim.
pub fn summary_markup(targets: &NutritionTargets) -> String {
    let calories = targets.rounded_calories();
    let m = targets.macros;
    let items = [
        ("🔥", calories.to_string(), "Calories"),
        ("🍗", format!("{}g", m.protein), "Protein"),
        ("🍚", format!("{}g", m.carbs), "Carbs"),
        ("🥑", format!("{}g", m.fats), "Fats"),
        ("💧", format!("{:.1}L", targets.water_liters), "Water"),
    ];

    let mut out = format!("<div class=\"{SUMMARY_CONTAINER_CLASS}\">\n");
    for (icon, value, label) in items {
        out.push_str(&format!(
            "  <div class=\"{SUMMARY_ITEM_CLASS}\">\n    <span class=\"icon\">{icon}</span>\n    <span class=\"value\">{value}</span>\n    <span class=\"label\">{label}</span>\n  </div>\n"
        ));
    }
    out.push_str("</div>");
    out
}

const MEAL_TABLE_TEMPLATE: &str = r#"<table>
  <thead>
    <tr>
      <th>Meal</th>
      <th>Time</th>
      <th>Options / Description</th>
    </tr>
  </thead>
  <tbody>
    <tr>
      <td>Pre-Workout</td>
      <td>5:30 AM – 6:00 AM</td>
      <td><ul><li>Detail 1</li><li>Detail 2</li></ul></td>
    </tr>
    <tr>
      <td>Breakfast</td>
      <td>7:30 AM – 8:30 AM</td>
      <td><strong>Option 1:</strong><ul><li>Detailed description 1</li></ul><strong>Option 2:</strong><ul><li>Detailed description 2</li></ul><strong>Option 3:</strong><ul><li>Detailed description 3</li></ul></td>
    </tr>
    <tr>
      <td>Lunch</td>
      <td>1:00 PM – 2:00 PM</td>
      <td><strong>Option 1:</strong><ul><li>Detailed description 1</li></ul><strong>Option 2:</strong><ul><li>Detailed description 2</li></ul><strong>Option 3:</strong><ul><li>Detailed description 3</li></ul></td>
    </tr>
    <tr>
      <td>Dinner</td>
      <td>7:30 PM – 8:30 PM</td>
      <td><strong>Option 1:</strong><ul><li>Detailed description 1</li></ul><strong>Option 2:</strong><ul><li>Detailed description 2</li></ul><strong>Option 3:</strong><ul><li>Detailed description 3</li></ul></td>
    </tr>
  </tbody>
</table>"#;

/// Builds the single instruction sent to the model. Deterministic for a given input.
pub fn build_prompt(profile: &UserProfile, targets: &NutritionTargets) -> String {
    let calories = targets.rounded_calories();
    let m = targets.macros;
    let allergies = or_placeholder(profile.allergies.as_deref());
    let exclude = or_placeholder(profile.exclude.as_deref());
    let comments = or_placeholder(profile.comments.as_deref());
    let preference = profile.diet_preference.as_str();
    let style = profile.diet_style.as_str();

    format!(
        r#"You are a professional nutritionist. Create a detailed diet plan for a person with the following details:
- Goal: {goal}
- Daily Calorie Target: Approximately {calories} calories
- Macronutrient Targets: Protein: {protein}g, Carbs: {carbs}g, Fats: {fats}g
- Daily Water Target: {water:.1}L
- Diet Preference: {style} {preference}
- Allergies: {allergies}
- Foods to Exclude: {exclude}
- Additional Comments: {comments}

First, create a summary section as a single HTML <div>. This div should contain the key nutritional targets: total calories, protein, carbs, fats, and water intake, in that order.
The summary div should be structured exactly like this example, using these exact class names:
{summary}

Following the summary div, generate the rest of the diet plan as a single HTML table tailored to the user's profile and adhering to the following constraints:
- Goal: {goal}
- Diet Preference: {preference}
- Cuisine Style: {style}
- Allergies: {allergies}
- Foods to Exclude: {exclude}
- Additional Comments: {comments}

The table must have the columns Meal, Time and Options / Description, and a row for each of Pre-Workout, Breakfast, Lunch and Dinner, structured like this:
{table}

For Breakfast, Lunch, and Dinner, provide at least 3 distinct, detailed meal options. The details should include portion sizes and ingredients.
Make the plan compact and visually appealing by using relevant emojis for each meal (e.g., 🍳 for Breakfast, 🥗 for Lunch).
Every option must respect the calorie and macronutrient targets above.

Ensure the final output is ONLY the raw HTML for the summary div AND the table, with no extra text, markdown, code fences, or explanations before or after it."#,
        goal = profile.goal.human(),
        protein = m.protein,
        carbs = m.carbs,
        fats = m.fats,
        water = targets.water_liters,
        summary = summary_markup(targets),
        table = MEAL_TABLE_TEMPLATE,
    )
}

/// Strips one leading code fence (tagged `html` or bare) and one trailing fence, then trims.
/// Nothing else about the markup is checked.
pub fn sanitize_response(raw: &str) -> String {
    let text = raw.trim();
    let text = LEADING_FENCE.replace(text, "");
    let text = TRAILING_FENCE.replace(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::{
        calculator::compute_targets,
        dto::{ActivityLevel, DietPreference, Gender, Goal, Macronutrients},
    };

    fn profile() -> UserProfile {
        UserProfile {
            age: 25,
            gender: Gender::Male,
            height_cm: 180.0,
            weight_kg: 70.0,
            activity_level: ActivityLevel::Sedentary,
            goal: Goal::WeightLoss,
            diet_preference: DietPreference::Eggetarian,
            diet_style: "South Indian".into(),
            allergies: Some("peanuts".into()),
            exclude: None,
            comments: None,
        }
    }

    fn targets() -> NutritionTargets {
        NutritionTargets {
            calories: 1597.6,
            macros: Macronutrients { protein: 160, carbs: 120, fats: 53 },
            water_liters: 2.5,
        }
    }

    #[test]
    fn prompt_embeds_rounded_targets() {
        let prompt = build_prompt(&profile(), &targets());
        assert!(prompt.contains("Approximately 1598 calories"));
        assert!(prompt.contains("Protein: 160g, Carbs: 120g, Fats: 53g"));
        assert!(prompt.contains("<span class=\"value\">2.5L</span>"));
        assert!(prompt.contains("<span class=\"value\">1598</span>"));
    }

    #[test]
    fn prompt_embeds_preferences_and_placeholders() {
        let prompt = build_prompt(&profile(), &targets());
        assert!(prompt.contains("- Goal: weight loss"));
        assert!(prompt.contains("- Diet Preference: South Indian eggetarian"));
        assert!(prompt.contains("- Cuisine Style: South Indian"));
        assert!(prompt.contains("- Allergies: peanuts"));
        assert!(prompt.contains("- Foods to Exclude: None specified"));
        assert!(prompt.contains("- Additional Comments: None specified"));
        assert!(!prompt.contains("weight-loss"));
    }

    #[test]
    fn prompt_demands_meal_table_and_no_fences() {
        let prompt = build_prompt(&profile(), &targets());
        for row in ["Pre-Workout", "Breakfast", "Lunch", "Dinner"] {
            assert!(prompt.contains(&format!("<td>{row}</td>")), "{row}");
        }
        assert!(prompt.contains("<th>Meal</th>"));
        assert!(prompt.contains("at least 3 distinct"));
        assert!(prompt.contains("no extra text, markdown, code fences"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let p = profile();
        let t = compute_targets(&p);
        assert_eq!(build_prompt(&p, &t), build_prompt(&p, &t));
    }

    #[test]
    fn summary_items_are_in_fixed_order() {
        let summary = summary_markup(&targets());
        let positions: Vec<usize> = ["Calories", "Protein", "Carbs", "Fats", "Water"]
            .iter()
            .map(|label| summary.find(&format!(">{label}<")).expect(label))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(summary.matches("class=\"summary-item\"").count(), 5);
        assert!(summary.starts_with("<div class=\"nutrition-summary\">"));
    }

    #[test]
    fn water_always_has_one_decimal() {
        let t = NutritionTargets { water_liters: 3.0, ..targets() };
        assert!(summary_markup(&t).contains(">3.0L<"));
    }

    #[test]
    fn sanitize_strips_html_fence() {
        let raw = "```html\n<div class=\"nutrition-summary\"></div>\n```";
        assert_eq!(sanitize_response(raw), "<div class=\"nutrition-summary\"></div>");
    }

    #[test]
    fn sanitize_strips_bare_fence_and_surrounding_whitespace() {
        let raw = "  \n```\n<table></table>\n```\n\n";
        assert_eq!(sanitize_response(raw), "<table></table>");
    }

    #[test]
    fn sanitize_leaves_unfenced_markup_alone() {
        let raw = "\n  <div>```inner```</div>  ";
        assert_eq!(sanitize_response(raw), "<div>```inner```</div>");
    }

    #[test]
    fn sanitize_does_not_validate_structure() {
        let raw = "Sure! Here is your plan.";
        assert_eq!(sanitize_response(raw), raw);
    }
}
