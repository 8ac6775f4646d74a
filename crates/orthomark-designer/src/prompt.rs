//! Synchronous free-text capture.
//!
//! The picking and annotation tools ask the host for two text fields before they
//! commit. The host answers inline: `Some(fields)` to confirm, `None` to cancel.

use std::collections::VecDeque;

/// What the tool is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Point type and point description.
    SurveyPoint,
    /// Order token and content.
    Annotation,
}

impl PromptKind {
    /// Captions of the two requested fields.
    pub fn field_labels(&self) -> (&'static str, &'static str) {
        match self {
            PromptKind::SurveyPoint => ("测点类型", "测点说明"),
            PromptKind::Annotation => ("标注序号", "标注内容"),
        }
    }
}

/// Two confirmed text fields, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptFields {
    pub first: String,
    pub second: String,
}

impl PromptFields {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into().trim().to_string(),
            second: second.into().trim().to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.first.is_empty() && !self.second.is_empty()
    }
}

/// Host side of the capture dialog.
pub trait TextPrompt {
    /// Blocks until the user confirms (`Some`) or cancels (`None`).
    fn request(&mut self, kind: PromptKind) -> Option<PromptFields>;
}

/// A prompt that always cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct CancelPrompt;

impl TextPrompt for CancelPrompt {
    fn request(&mut self, _kind: PromptKind) -> Option<PromptFields> {
        None
    }
}

/// Replays queued answers in order; cancels once the queue is empty.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<PromptFields>>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm(mut self, first: &str, second: &str) -> Self {
        self.answers.push_back(Some(PromptFields::new(first, second)));
        self
    }

    pub fn cancel(mut self) -> Self {
        self.answers.push_back(None);
        self
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl TextPrompt for ScriptedPrompt {
    fn request(&mut self, _kind: PromptKind) -> Option<PromptFields> {
        self.answers.pop_front().flatten()
    }
}
