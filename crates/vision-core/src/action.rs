use std::fmt;

/// The two operations exposed by the vision API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    FaceMatch,
    DescriptionSearch,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::FaceMatch, Action::DescriptionSearch];

    pub fn endpoint(&self) -> &'static str {
        match self {
            Action::FaceMatch => "/api/face-match",
            Action::DescriptionSearch => "/api/description-search",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::FaceMatch => "face-match",
            Action::DescriptionSearch => "description-search",
        }
    }

    /// Label shown next to the progress bar while the action is in flight
    pub fn progress_label(&self) -> &'static str {
        match self {
            Action::FaceMatch => "Running face match pipeline…",
            Action::DescriptionSearch => "Searching description across frames…",
        }
    }

    pub fn panel_title(&self) -> &'static str {
        match self {
            Action::FaceMatch => "Face match segments",
            Action::DescriptionSearch => "Description matches",
        }
    }

    pub fn empty_hint(&self) -> &'static str {
        match self {
            Action::FaceMatch => "Run a face match to inspect the detected clips.",
            Action::DescriptionSearch => "Trigger a description search to see relevant time spans.",
        }
    }

    /// Notice printed once a submission succeeds
    pub fn completion_notice(&self, segment_count: usize) -> String {
        let plural = if segment_count == 1 { "" } else { "s" };
        match self {
            Action::FaceMatch => {
                format!("Face match finished ({segment_count} segment{plural})")
            }
            Action::DescriptionSearch => {
                format!("Found {segment_count} matching description segment{plural}")
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_rooted_under_api() {
        for action in Action::ALL {
            assert!(action.endpoint().starts_with("/api/"));
        }
    }

    #[test]
    fn completion_notice_pluralizes() {
        assert_eq!(
            Action::FaceMatch.completion_notice(1),
            "Face match finished (1 segment)"
        );
        assert_eq!(
            Action::FaceMatch.completion_notice(0),
            "Face match finished (0 segments)"
        );
        assert_eq!(
            Action::DescriptionSearch.completion_notice(3),
            "Found 3 matching description segments"
        );
    }
}
