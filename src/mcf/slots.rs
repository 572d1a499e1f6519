// src/mcf/slots.rs

/// Dimensional property values recognised from one identifier's tokens.
///
/// Each field corresponds to one property suffix on the `populationType`
/// line. Tokens are classified independently, so a later token landing in an
/// already-filled slot overwrites it; in particular a weight-category token
/// replaces an earlier physical-activity match in `health_behavior`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Slots {
    pub income: Option<String>,
    pub education: Option<String>,
    pub health_behavior: Option<String>,
    pub exercise: Option<String>,
    pub residence: Option<String>,
    pub activity: Option<String>,
    pub duration: Option<String>,
    pub gender: Option<String>,
    pub nativity: Option<String>,
    pub citizenship: Option<String>,
    pub activity_limitation: Option<String>,
}

impl Slots {
    /// Classify a single property token, first match wins. Returns true when
    /// the token named a dimension and so belongs in the display name.
    pub fn apply(&mut self, prop: &str) -> bool {
        if prop.contains("PhysicalActivity") {
            self.health_behavior = Some(prop.to_string());
        } else if prop.contains("Male") || prop.contains("Female") {
            self.gender = Some(prop.to_string());
        } else if prop.contains("Aerobic")
            || prop.contains("MuscleStrengthening")
            || prop.contains("Walking")
            || prop.contains("Cycling")
        {
            self.exercise = Some(prop.to_string());
        } else if prop.contains("Education") {
            self.education = Some(
                prop.replace("EducationalAttainment", "")
                    .replace("Or", "__"),
            );
        } else if prop.contains("Percentile") {
            self.income = Some(format!(
                "[{} Percentile]",
                prop.replace("Percentile", "")
                    .replace("To", " ")
                    .replace("IncomeOf", "")
            ));
        } else if prop.contains("Urban") || prop.contains("SemiUrban") || prop.contains("Rural") {
            self.residence = Some(prop.to_string());
        } else if prop.contains("Activity") {
            self.activity = Some(prop.to_string());
        } else if prop.contains("Minutes") {
            self.duration = Some(if prop.contains("OrMoreMinutes") {
                format!("[{} - Minutes]", prop.replace("OrMoreMinutes", ""))
            } else if prop.contains("To") {
                format!(
                    "[{} Minutes]",
                    prop.replace("Minutes", "").replace("To", " ")
                )
            } else {
                format!("[Minutes {}]", prop.replace("Minutes", ""))
            });
        } else if prop.contains("ForeignBorn") || prop.contains("Native") {
            self.nativity = Some(prop.replace("CountryOfBirth", ""));
        } else if prop.contains("ForeignWithin")
            || prop.contains("ForeignOutside")
            || prop.contains("Citizen")
        {
            self.citizenship = Some(prop.replace("Citizenship", ""));
        } else if prop.contains("Moderate") || prop.contains("Severe") || prop.contains("None") {
            self.activity_limitation = Some(prop.to_string());
        } else if prop.contains("weight")
            || prop.contains("Normal")
            || prop.contains("Obese")
            || prop.contains("Obesity")
        {
            self.health_behavior = Some(prop.to_string());
        } else {
            return false;
        }
        true
    }

    /// Property suffixes for the `populationType` line, in the fixed output
    /// order. Each filled slot contributes a `\n`-prefixed line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        push_quantity(&mut out, "income", &self.income);
        push_node(&mut out, "educationalAttainment", &self.education);
        push_node(&mut out, "healthBehavior", &self.health_behavior);
        push_node(&mut out, "exerciseType", &self.exercise);
        push_node(&mut out, "placeOfResidenceClassification", &self.residence);
        push_node(&mut out, "physicalActivityEffortLevel", &self.activity);
        push_quantity(&mut out, "duration", &self.duration);
        push_node(&mut out, "gender", &self.gender);
        push_node(&mut out, "nativity", &self.nativity);
        push_node(&mut out, "citizenship", &self.citizenship);
        // property name spelled exactly as it appears in the schema
        push_node(
            &mut out,
            "globalActivityLimitationindicator",
            &self.activity_limitation,
        );
        out
    }
}

fn push_node(out: &mut String, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        out.push('\n');
        out.push_str(key);
        out.push_str(": dcs:");
        out.push_str(v);
    }
}

fn push_quantity(out: &mut String, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        out.push('\n');
        out.push_str(key);
        out.push_str(": ");
        out.push_str(v);
    }
}
