//! Prompt template loading and rendering via `minijinja`.
//!
//! The three templates ship inside the binary. Setting `TEMPLATES_DIR`
//! loads them from disk instead, so prompt wording can be tuned without
//! recompiling. The directory must contain `system.j2`, `timelines.j2`,
//! and `branch.j2`.

use std::path::Path;

use minijinja::Environment;
use parallel_types::Mood;
use serde::Serialize;

use crate::error::RunnerError;

const SYSTEM: &str = "system";
const TIMELINES: &str = "timelines";
const BRANCH: &str = "branch";

/// Template names paired with their file names and embedded sources.
const TEMPLATES: [(&str, &str, &str); 3] = [
    (SYSTEM, "system.j2", include_str!("../templates/system.j2")),
    (TIMELINES, "timelines.j2", include_str!("../templates/timelines.j2")),
    (BRANCH, "branch.j2", include_str!("../templates/branch.j2")),
];

/// Emoji shown in the example timeline of the generation prompt.
const EXAMPLE_EMOJI: &str = "\u{1F3D4}\u{FE0F}";

/// Renders the generation and branch prompts.
#[derive(Debug)]
pub struct PromptEngine {
    env: Environment<'static>,
}

/// The complete rendered prompt ready to send to a completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    /// System message constraining output to JSON.
    pub system: String,
    /// User message with the decision, years, shape, and style rules.
    pub user: String,
}

/// Inputs to the full-generation prompt.
#[derive(Debug, Clone, Copy)]
pub struct TimelinePrompt<'a> {
    /// The user's decision text.
    pub decision: &'a str,
    /// First event year.
    pub start_year: i32,
    /// Events per timeline.
    pub years: u32,
}

/// Inputs to the branch prompt.
#[derive(Debug, Clone, Copy)]
pub struct BranchPrompt<'a> {
    /// The simulation's original decision text.
    pub decision: &'a str,
    /// Year of the event being re-decided.
    pub event_year: i32,
    /// Title of the event being re-decided.
    pub event_title: &'a str,
    /// Description of the event being re-decided.
    pub event_description: &'a str,
    /// What the user would have done instead.
    pub alternate_choice: &'a str,
    /// Number of follow-up events requested.
    pub count: usize,
}

#[derive(Serialize)]
struct TimelineContext<'a> {
    decision: &'a str,
    start_year: i32,
    years: u32,
    example_emoji: &'a str,
    moods: [&'static str; 6],
}

#[derive(Serialize)]
struct BranchContext<'a> {
    decision: &'a str,
    event_year: i32,
    event_title: &'a str,
    event_description: &'a str,
    alternate_choice: &'a str,
    count: usize,
    moods: [&'static str; 6],
}

impl PromptEngine {
    /// Create an engine from the embedded templates, or from `templates_dir`
    /// when given.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Template`] if a file is missing or a
    /// template does not compile.
    pub fn new(templates_dir: Option<&Path>) -> Result<Self, RunnerError> {
        templates_dir.map_or_else(Self::embedded, Self::from_dir)
    }

    /// Create an engine from the templates compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Template`] if an embedded template does not
    /// compile.
    pub fn embedded() -> Result<Self, RunnerError> {
        let mut env = Environment::new();
        for (name, _, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| RunnerError::Template(format!("failed to add {name} template: {e}")))?;
        }
        Ok(Self { env })
    }

    /// Create an engine loading every template from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Template`] if a file is missing or a
    /// template does not compile.
    pub fn from_dir(dir: &Path) -> Result<Self, RunnerError> {
        let mut env = Environment::new();
        for (name, filename, _) in TEMPLATES {
            let source = load_template(dir, filename)?;
            env.add_template_owned(name, source)
                .map_err(|e| RunnerError::Template(format!("failed to add {name} template: {e}")))?;
        }
        Ok(Self { env })
    }

    /// Render the full three-timeline generation prompt.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Template`] if rendering fails.
    pub fn render_timelines(&self, input: &TimelinePrompt<'_>) -> Result<RenderedPrompt, RunnerError> {
        let context = TimelineContext {
            decision: input.decision,
            start_year: input.start_year,
            years: input.years,
            example_emoji: EXAMPLE_EMOJI,
            moods: mood_names(),
        };
        Ok(RenderedPrompt {
            system: self.render(SYSTEM, &context)?,
            user: self.render(TIMELINES, &context)?,
        })
    }

    /// Render the single-event branch prompt.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Template`] if rendering fails.
    pub fn render_branch(&self, input: &BranchPrompt<'_>) -> Result<RenderedPrompt, RunnerError> {
        let context = BranchContext {
            decision: input.decision,
            event_year: input.event_year,
            event_title: input.event_title,
            event_description: input.event_description,
            alternate_choice: input.alternate_choice,
            count: input.count,
            moods: mood_names(),
        };
        Ok(RenderedPrompt {
            system: self.render(SYSTEM, &context)?,
            user: self.render(BRANCH, &context)?,
        })
    }

    fn render(&self, name: &str, context: &impl Serialize) -> Result<String, RunnerError> {
        self.env
            .get_template(name)
            .map_err(|e| RunnerError::Template(format!("missing {name} template: {e}")))?
            .render(context)
            .map_err(|e| RunnerError::Template(format!("{name} render failed: {e}")))
    }
}

fn mood_names() -> [&'static str; 6] {
    Mood::ALL.map(Mood::as_str)
}

/// Read a template file from disk.
fn load_template(dir: &Path, filename: &str) -> Result<String, RunnerError> {
    let path = dir.join(filename);
    std::fs::read_to_string(&path)
        .map_err(|e| RunnerError::Template(format!("failed to read {}: {e}", path.display())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn timeline_prompt() -> RenderedPrompt {
        PromptEngine::embedded()
            .unwrap()
            .render_timelines(&TimelinePrompt {
                decision: "In 2019 I said \"no\" to the promotion",
                start_year: 2019,
                years: 7,
            })
            .unwrap()
    }

    #[test]
    fn system_prompt_demands_json_only() {
        let prompt = timeline_prompt();
        assert!(prompt.system.contains("Output ONLY valid JSON"));
    }

    #[test]
    fn timeline_prompt_embeds_year_count_and_decision() {
        let prompt = timeline_prompt();
        assert!(prompt.user.contains("The decision year is 2019"));
        assert!(prompt.user.contains("2019, 2020, 2021, etc."));
        assert!(prompt.user.contains("Generate exactly 7 events per timeline"));
        assert!(prompt.user.contains("\"no\" to the promotion"));
        assert!(prompt.user.contains("hopeful, thriving, struggling, turning-point, peaceful, chaotic"));
        assert!(prompt.user.contains("\"finalSnapshot\""));
    }

    #[test]
    fn branch_prompt_embeds_divergence_point() {
        let prompt = PromptEngine::embedded()
            .unwrap()
            .render_branch(&BranchPrompt {
                decision: "Moved abroad",
                event_year: 2022,
                event_title: "Rock Bottom",
                event_description: "A moment of clarity",
                alternate_choice: "Asked for help",
                count: 3,
            })
            .unwrap();
        assert!(prompt.user.contains("At year 2022, instead of \"Rock Bottom\" (A moment of clarity)"));
        assert!(prompt.user.contains("\"Asked for help\""));
        assert!(prompt.user.contains("2022, 2023, 2024, etc."));
        assert!(prompt.user.contains("Generate exactly 3 events"));
    }

    #[test]
    fn templates_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("system.j2"), "JSON please").unwrap();
        std::fs::write(dir.path().join("timelines.j2"), "{{ decision }} @ {{ start_year }} x{{ years }}").unwrap();
        std::fs::write(dir.path().join("branch.j2"), "{{ alternate_choice }} x{{ count }}").unwrap();

        let engine = PromptEngine::new(Some(dir.path())).unwrap();
        let prompt = engine
            .render_timelines(&TimelinePrompt {
                decision: "Quit",
                start_year: 2001,
                years: 3,
            })
            .unwrap();
        assert_eq!(prompt.system, "JSON please");
        assert_eq!(prompt.user, "Quit @ 2001 x3");
    }

    #[test]
    fn missing_template_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("system.j2"), "test").unwrap();
        assert!(matches!(
            PromptEngine::from_dir(dir.path()),
            Err(RunnerError::Template(_))
        ));
    }
}
