use lexiscan_config::OutputFormat;
use lexiscan_types::DisplayState;

use crate::html::to_html;
use crate::region::OutputRegion;
use crate::text::to_text;
use crate::view::build_view;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Illegal display transition: {from} -> {to}")]
    IllegalTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("Failed to write output: {0}")]
    Region(#[from] std::io::Error),

    #[error("Failed to serialize state: {0}")]
    Json(#[from] serde_json::Error),
}

/// Owns the currently displayed state and the region it is painted into.
///
/// Every render repaints the whole region from the given state alone.
pub struct Renderer {
    region: Box<dyn OutputRegion>,
    format: OutputFormat,
    styled: bool,
    current: DisplayState,
}

impl Renderer {
    pub fn new(region: Box<dyn OutputRegion>, format: OutputFormat, styled: bool) -> Self {
        Self {
            region,
            format,
            styled,
            current: DisplayState::Idle,
        }
    }

    pub fn current(&self) -> &DisplayState {
        &self.current
    }

    /// Repaint the region with `state`. Transitions the display state machine
    /// does not allow are refused and leave the region untouched; repeating
    /// the current state is always allowed.
    pub fn render(&mut self, state: DisplayState) -> Result<(), RenderError> {
        if state != self.current && !self.current.can_transition_to(&state) {
            return Err(RenderError::IllegalTransition {
                from: self.current.name(),
                to: state.name(),
            });
        }

        let content = self.paint(&state)?;
        self.region.replace(&content)?;
        tracing::debug!("Rendered {}", state.name());
        self.current = state;
        Ok(())
    }

    pub fn paint(&self, state: &DisplayState) -> Result<String, RenderError> {
        let content = match self.format {
            OutputFormat::Text => to_text(&build_view(state), self.styled),
            OutputFormat::Html => to_html(&build_view(state)),
            OutputFormat::Json => serde_json::to_string_pretty(state)? + "\n",
        };
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use lexiscan_types::{Failure, Meaning, WordEntry};

    use super::*;
    use crate::region::MemoryRegion;

    fn renderer(format: OutputFormat) -> (Renderer, MemoryRegion) {
        let region = MemoryRegion::new();
        (Renderer::new(Box::new(region.clone()), format, false), region)
    }

    fn populated() -> DisplayState {
        DisplayState::PopulatedResult(vec![WordEntry::found(
            "run",
            vec![Meaning::new("verb", vec!["move fast".into()])],
        )])
    }

    #[test]
    fn rendering_twice_gives_identical_output() {
        let (mut renderer, region) = renderer(OutputFormat::Text);

        renderer.render(DisplayState::Processing).unwrap();
        renderer.render(populated()).unwrap();
        let first = region.content();
        renderer.render(populated()).unwrap();

        assert_eq!(region.content(), first);
    }

    #[test]
    fn each_render_replaces_previous_content() {
        let (mut renderer, region) = renderer(OutputFormat::Text);

        renderer.render(DisplayState::Processing).unwrap();
        assert!(region.content().starts_with("Processing..."));

        renderer.render(populated()).unwrap();
        assert!(!region.content().contains("Processing"));

        renderer.render(DisplayState::Processing).unwrap();
        renderer.render(DisplayState::EmptyResult).unwrap();
        assert!(!region.content().contains("run"));
    }

    #[test]
    fn illegal_transition_leaves_region_untouched() {
        let (mut renderer, region) = renderer(OutputFormat::Text);

        let err = renderer.render(populated()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::IllegalTransition {
                from: "idle",
                to: "populated_result"
            }
        ));
        assert_eq!(region.content(), "");
        assert_eq!(renderer.current(), &DisplayState::Idle);

        renderer.render(DisplayState::Processing).unwrap();
        renderer.render(DisplayState::Error(Failure::Status(500))).unwrap();
        assert!(renderer.render(DisplayState::EmptyResult).is_err());
        assert!(region.content().contains("HTTP error! status: 500"));
    }

    #[test]
    fn json_format_serializes_state() {
        let (mut renderer, region) = renderer(OutputFormat::Json);

        renderer.render(DisplayState::Processing).unwrap();
        renderer
            .render(DisplayState::Error(Failure::Application("bad file".into())))
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&region.content()).unwrap();
        assert_eq!(value["state"], "error");
        assert_eq!(value["data"]["detail"], "bad file");
    }
}
