//! Fixed starter prompts and the data fields the service can draw on

/// A canned prompt offered on the landing and suggestion screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub title: &'static str,
    pub prompt: &'static str,
}

pub const SUGGESTIONS: [Suggestion; 4] = [
    Suggestion {
        title: "Employee Attrition Dashboard",
        prompt: "Create an attrition dashboard for this year",
    },
    Suggestion {
        title: "Hours Analysis by Location",
        prompt: "Show employee hours breakdown for Mobile, AL",
    },
    Suggestion {
        title: "Workforce Demographics",
        prompt: "Create a demographics dashboard by job family",
    },
    Suggestion {
        title: "Blue/White Collar Analysis",
        prompt: "Analyze blue collar vs white collar distribution",
    },
];

/// Field groups listed under "Available Data Fields"
pub const DATA_FIELDS: [&str; 6] = [
    "Employee Demographics",
    "Job Profiles & Titles",
    "Work Hours",
    "Location Data",
    "Employment Status",
    "Band & Classification",
];

/// Look up a suggestion by its zero-based position
pub fn suggestion(index: usize) -> Option<&'static Suggestion> {
    SUGGESTIONS.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_lookup() {
        assert_eq!(
            suggestion(1).map(|s| s.prompt),
            Some("Show employee hours breakdown for Mobile, AL")
        );
        assert!(suggestion(4).is_none());
    }

    #[test]
    fn test_prompts_are_not_blank() {
        assert!(SUGGESTIONS.iter().all(|s| !s.prompt.trim().is_empty()));
    }
}
