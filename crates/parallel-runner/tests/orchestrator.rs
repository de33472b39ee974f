//! Orchestrator tests against a scripted completion service.
//!
//! Every call pops the next scripted response; prompts are recorded so
//! tests can check what was sent.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::missing_panics_doc
)]

use std::collections::VecDeque;
use std::sync::Mutex;

use parallel_runner::{
    BranchRequest, CompletionService, GenerationSource, Orchestrator, PromptEngine,
    RenderedPrompt, RunnerError,
};
use parallel_types::{Horizon, TimelineSlot};
use serde_json::{Value, json};

struct ScriptedService {
    responses: Mutex<VecDeque<Result<String, RunnerError>>>,
    prompts: Mutex<Vec<RenderedPrompt>>,
}

impl ScriptedService {
    fn new(responses: Vec<Result<String, RunnerError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<RenderedPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

impl CompletionService for ScriptedService {
    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RunnerError::LlmBackend("script exhausted".into())))
    }
}

fn orchestrator(responses: Vec<Result<String, RunnerError>>) -> Orchestrator<ScriptedService> {
    Orchestrator::new(
        ScriptedService::new(responses),
        PromptEngine::embedded().unwrap(),
    )
    .with_current_year(2026)
}

fn timeline_json(name: &str, first_year: i32, count: i32) -> Value {
    let events: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "year": first_year + i * 3,
                "title": format!("{name} {i}"),
                "description": "Things change.",
                "mood": "growing",
                "moodScore": 60
            })
        })
        .collect();
    json!({
        "name": name,
        "emoji": "\u{1F30A}",
        "description": "Another way",
        "events": events,
        "finalSnapshot": {
            "career": "Teacher",
            "location": "Porto",
            "relationship": "Partnered",
            "keyAchievement": "A school garden",
            "biggestRegret": "Waiting so long",
            "happinessScore": 81,
            "wealthScore": 40,
            "growthScore": 75,
            "quote": "Slower, but mine."
        }
    })
}

fn full_completion(count: i32) -> String {
    json!({
        "decisionSummary": "Staying home",
        "timelines": [
            timeline_json("Bold", 1990, count),
            timeline_json("Middle", 1990, count),
            timeline_json("Quiet", 1990, count),
        ],
        "insight": "Every road teaches."
    })
    .to_string()
}

#[tokio::test]
async fn model_response_is_normalized() {
    let orch = orchestrator(vec![Ok(full_completion(5))]);
    let generated = orch
        .generate_timelines("In 2019 I stayed in my hometown", Horizon::new(5).unwrap())
        .await;

    assert_eq!(generated.source, GenerationSource::Model);
    let draft = generated.value;
    assert_eq!(draft.decision_year, 2019);
    assert_eq!(draft.decision_summary, "Staying home");
    for (timeline, slot) in draft.timelines.iter().zip(TimelineSlot::ALL) {
        assert_eq!(timeline.id, slot);
        let years: Vec<i32> = timeline.events.iter().map(|e| e.year).collect();
        assert_eq!(years, [2019, 2020, 2021, 2022, 2023]);
    }
}

#[tokio::test]
async fn transport_error_falls_back_with_extracted_year() {
    let orch = orchestrator(vec![Err(RunnerError::LlmBackend("503".into()))]);
    let generated = orch
        .generate_timelines("Back in 2021 I quit law school", Horizon::new(10).unwrap())
        .await;

    assert_eq!(generated.source, GenerationSource::Fallback);
    assert_eq!(generated.value.decision_year, 2021);
    for timeline in &generated.value.timelines {
        assert_eq!(timeline.events.len(), 10);
        assert_eq!(timeline.events[0].year, 2021);
    }
}

#[tokio::test]
async fn garbage_response_falls_back() {
    let orch = orchestrator(vec![Ok("I'd rather not answer that.".to_owned())]);
    let generated = orch
        .generate_timelines("I never learned to drive", Horizon::new(3).unwrap())
        .await;

    assert_eq!(generated.source, GenerationSource::Fallback);
    assert_eq!(generated.value.decision_year, 2026);
    assert_eq!(generated.value.timelines[0].events.len(), 3);
}

#[tokio::test]
async fn prompt_carries_decision_and_year() {
    let orch = orchestrator(vec![Ok(full_completion(4))]);
    orch.generate_timelines("In 2020 I adopted a dog", Horizon::new(3).unwrap())
        .await;

    let prompts = orch.service().prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].user.contains("I adopted a dog"));
    assert!(prompts[0].user.contains("2020"));
    assert!(!prompts[0].system.is_empty());
}

#[tokio::test]
async fn tokens_increase_and_only_latest_counts() {
    let orch = orchestrator(vec![Ok(full_completion(4)), Ok(full_completion(4))]);
    let first = orch
        .generate_timelines("I moved", Horizon::new(3).unwrap())
        .await;
    let second = orch
        .generate_timelines("I stayed", Horizon::new(3).unwrap())
        .await;

    assert!(second.token.get() > first.token.get());
    assert!(!orch.tracker().is_latest(first.token));
    assert!(orch.tracker().is_latest(second.token));
}

fn branch_request(count: usize) -> BranchRequest<'static> {
    BranchRequest {
        decision: "In 2019 I stayed in my hometown",
        event_year: 2021,
        event_title: "Rock Bottom",
        event_description: "Lost the job.",
        alternate_choice: "Asked my sister for help",
        count,
    }
}

#[tokio::test]
async fn branch_from_model_is_dated_from_event_year() {
    let raw = json!({
        "events": [
            { "year": 1999, "title": "Called her", "description": "It helped.", "mood": "hopeful", "moodScore": 55 },
            { "year": 1999, "title": "New start", "description": "Fresh job.", "mood": "growing", "moodScore": 70 }
        ],
        "finalSnapshot": { "career": "Nurse", "happinessScore": 80 }
    })
    .to_string();
    let orch = orchestrator(vec![Ok(raw)]);
    let generated = orch.generate_branch(&branch_request(3)).await;

    assert_eq!(generated.source, GenerationSource::Model);
    let outcome = generated.value;
    let years: Vec<i32> = outcome.events.iter().map(|e| e.year).collect();
    assert_eq!(years, [2021, 2022, 2023]);
    assert_eq!(outcome.events[0].title, "Called her");
    assert_eq!(outcome.snapshot.career, "Nurse");
    assert_eq!(outcome.snapshot.happiness_score, 80);

    let prompts = orch.service().prompts();
    assert!(prompts[0].user.contains("Asked my sister for help"));
    assert!(prompts[0].user.contains("Rock Bottom"));
}

#[tokio::test]
async fn branch_failure_uses_choice_as_first_title() {
    let orch = orchestrator(vec![Ok("{\"events\": []}".to_owned())]);
    let generated = orch.generate_branch(&branch_request(2)).await;

    assert_eq!(generated.source, GenerationSource::Fallback);
    let titles: Vec<&str> = generated
        .value
        .events
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, ["Asked my sister for help", "New Path 2"]);
    assert_eq!(generated.value.events[1].year, 2022);
}

#[tokio::test]
async fn earlier_branch_is_superseded_by_a_later_one() {
    let orch = orchestrator(Vec::new());
    let earlier = orch.generate_branch(&branch_request(2)).await;
    let later = orch.generate_branch(&branch_request(2)).await;

    assert!(!orch.tracker().is_latest(earlier.token));
    assert!(orch.tracker().is_latest(later.token));
    assert_eq!(later.source, GenerationSource::Fallback);
}
