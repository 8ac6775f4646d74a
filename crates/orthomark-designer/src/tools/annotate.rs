use orthomark_core::Point;
use tracing::debug;

use super::{Commit, PointerButton, ToolContext, ToolOutcome};
use crate::labels::Annotation;
use crate::notice::Notice;
use crate::prompt::PromptKind;

/// Places a numbered free-text annotation after asking for order and content.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnnotateTool;

impl AnnotateTool {
    pub fn pointer_down(
        &mut self,
        ctx: &mut ToolContext<'_>,
        point: Point,
        button: PointerButton,
    ) -> ToolOutcome {
        if button != PointerButton::Primary {
            return ToolOutcome::Ignored;
        }
        if let Err(e) = ctx.require_dataset() {
            return ToolOutcome::Notice(e.into());
        }
        let Some(fields) = ctx.prompt.request(PromptKind::Annotation) else {
            return ToolOutcome::Notice(Notice::PromptCancelled);
        };
        if !fields.is_complete() {
            return ToolOutcome::Notice(Notice::IncompleteFields);
        }

        debug!("Annotation {} at {}", fields.first, point);
        let order = fields.first.clone();
        ctx.document.add_annotation(Annotation {
            position: point,
            order: fields.first,
            content: fields.second,
        });
        ToolOutcome::Committed(Commit::Annotation { order })
    }
}
