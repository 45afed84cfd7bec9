use std::path::{Path, PathBuf};

use crate::{
    action::Action,
    error::{Result, VisionError},
};

/// Inputs for one submission.
#[derive(Clone, Debug, Default)]
pub struct SubmissionParts {
    pub video: Option<PathBuf>,
    pub reference: Option<PathBuf>,
    pub description: Option<String>,
}

impl SubmissionParts {
    pub fn new(video: impl Into<PathBuf>) -> Self {
        Self {
            video: Some(video.into()),
            ..Self::default()
        }
    }

    pub fn with_reference(mut self, reference: impl Into<PathBuf>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Trimmed description, `None` when blank
    pub fn prompt(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|prompt| !prompt.is_empty())
    }

    /// Check that everything `action` requires is present
    pub fn validate(&self, action: Action) -> Result<()> {
        if self.video.is_none() {
            return Err(VisionError::MissingVideo);
        }
        match action {
            Action::FaceMatch if self.reference.is_none() => Err(VisionError::MissingReference),
            Action::DescriptionSearch if self.prompt().is_none() => {
                Err(VisionError::MissingDescription)
            }
            _ => Ok(()),
        }
    }

    pub fn can_run(&self, action: Action) -> bool {
        self.validate(action).is_ok()
    }

    /// Multipart fields in the order they are sent for `action`
    pub(crate) fn fields(&self, action: Action) -> Vec<(&'static str, Field<'_>)> {
        let video = self.video.as_deref().map(Field::File);
        let reference = self.reference.as_deref().map(Field::File);
        let description = self.prompt().map(Field::Text);

        let ordered = match action {
            Action::FaceMatch => [
                ("video", video),
                ("reference", reference),
                ("description", description),
            ],
            Action::DescriptionSearch => [
                ("video", video),
                ("description", description),
                ("reference", reference),
            ],
        };

        ordered
            .into_iter()
            .filter_map(|(name, field)| field.map(|field| (name, field)))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Field<'a> {
    File(&'a Path),
    Text(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_is_required_for_every_action() {
        let parts = SubmissionParts::default().with_description("red hat");
        for action in Action::ALL {
            assert!(matches!(
                parts.validate(action),
                Err(VisionError::MissingVideo)
            ));
        }
    }

    #[test]
    fn face_match_requires_reference() {
        let parts = SubmissionParts::new("clip.mp4").with_description("red hat");
        assert!(matches!(
            parts.validate(Action::FaceMatch),
            Err(VisionError::MissingReference)
        ));
        assert!(parts.with_reference("face.jpg").can_run(Action::FaceMatch));
    }

    #[test]
    fn description_search_requires_non_blank_description() {
        let parts = SubmissionParts::new("clip.mp4")
            .with_reference("face.jpg")
            .with_description("   ");
        assert!(matches!(
            parts.validate(Action::DescriptionSearch),
            Err(VisionError::MissingDescription)
        ));
    }

    #[test]
    fn fields_follow_action_order_and_skip_absent_parts() {
        let parts = SubmissionParts::new("clip.mp4").with_description(" red hat ");
        let names: Vec<_> = parts
            .fields(Action::DescriptionSearch)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["video", "description"]);

        let parts = parts.with_reference("face.jpg");
        let fields = parts.fields(Action::FaceMatch);
        assert_eq!(fields[0], ("video", Field::File(Path::new("clip.mp4"))));
        assert_eq!(fields[1], ("reference", Field::File(Path::new("face.jpg"))));
        assert_eq!(fields[2], ("description", Field::Text("red hat")));
    }

    #[test]
    fn prompt_is_trimmed() {
        let parts = SubmissionParts::new("clip.mp4").with_description("  white sneakers \n");
        assert_eq!(parts.prompt(), Some("white sneakers"));
    }
}
