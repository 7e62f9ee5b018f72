// src/conversation.rs
//! Criteria collection as an explicit state machine, one field per round-trip.
//!
//! [`step`] is pure: it takes the session by value and returns the next
//! session with the effect the caller should perform. Sessions are
//! independent values, so any number can run side by side.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::criteria::{
    is_unset, parse_experience, parse_optional_text, parse_result_limit, parse_salary,
    parse_yes_no, split_keywords,
};
use crate::types::{SearchCriteria, Site};

const JOB_POSITION_PROMPT: &str = "Enter the job position (e.g., Data Scientist, Web Developer): ";
const LOCATION_PROMPT: &str = "Enter the location (e.g., Kyiv, Lviv or leave blank): ";
const SALARY_PROMPT: &str =
    "Enter salary budget expectation (e.g., 20000 or leave blank for no preference): ";
const EXPERIENCE_PROMPT: &str =
    "Enter minimum years of experience (e.g. 7 or leave blank for no preference): ";
const LANGUAGE_PROMPT: &str =
    "Is English language knowledge required? (type yes or leave blank): ";
const KEYWORDS_PROMPT: &str = "Enter keywords (e.g., data analyst python sql or leave blank): ";
const COUNT_PROMPT: &str = "How many resumes should be displayed? (leave blank for 10): ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationState {
    JobPosition,
    Location,
    Salary,
    Experience,
    Language,
    Keywords,
    Site,
    Count,
    Done,
}

/// Answers collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaDraft {
    pub job_position: Option<String>,
    pub location: Option<String>,
    pub salary: Option<u32>,
    pub experience_years: Option<u32>,
    pub requires_english: Option<bool>,
    pub keywords: Vec<String>,
    pub site: Option<Site>,
    pub result_limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub state: ConversationState,
    pub draft: CriteriaDraft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show the next question.
    Prompt(String),
    /// Input was invalid; the session has not advanced.
    Reject { reason: String, reprompt: String },
    /// All answers are in.
    Search { criteria: SearchCriteria, site: Site },
}

pub fn site_prompt() -> String {
    let mut prompt = String::from("Select job site to parse resumes from:\n");
    for site in Site::ALL {
        prompt.push_str(&format!("{}. {}\n", site.menu_number(), site.domain()));
    }
    prompt.push_str("Enter your choice (1 or 2): ");
    prompt
}

fn prompt_for(state: ConversationState) -> String {
    match state {
        ConversationState::JobPosition => JOB_POSITION_PROMPT.to_string(),
        ConversationState::Location => LOCATION_PROMPT.to_string(),
        ConversationState::Salary => SALARY_PROMPT.to_string(),
        ConversationState::Experience => EXPERIENCE_PROMPT.to_string(),
        ConversationState::Language => LANGUAGE_PROMPT.to_string(),
        ConversationState::Keywords => KEYWORDS_PROMPT.to_string(),
        ConversationState::Site => site_prompt(),
        ConversationState::Count => COUNT_PROMPT.to_string(),
        ConversationState::Done => String::new(),
    }
}

pub fn start() -> (Session, Effect) {
    start_with_id(Uuid::new_v4())
}

pub fn start_with_id(id: Uuid) -> (Session, Effect) {
    let session = Session {
        id,
        state: ConversationState::JobPosition,
        draft: CriteriaDraft::default(),
    };
    (session, Effect::Prompt(JOB_POSITION_PROMPT.to_string()))
}

fn reject(session: Session, reason: impl ToString) -> (Session, Effect) {
    let reprompt = prompt_for(session.state);
    (
        session,
        Effect::Reject {
            reason: reason.to_string(),
            reprompt,
        },
    )
}

fn advance(mut session: Session, next: ConversationState) -> (Session, Effect) {
    session.state = next;
    let prompt = prompt_for(next);
    (session, Effect::Prompt(prompt))
}

/// Feed one line of user input to the session.
///
/// Input arriving after `Done` starts a fresh draft under the same id.
pub fn step(mut session: Session, input: &str) -> (Session, Effect) {
    match session.state {
        ConversationState::JobPosition => {
            if is_unset(input) {
                return reject(session, "Job position is required.");
            }
            session.draft.job_position = Some(input.trim().to_string());
            advance(session, ConversationState::Location)
        }
        ConversationState::Location => {
            session.draft.location = parse_optional_text(input);
            advance(session, ConversationState::Salary)
        }
        ConversationState::Salary => match parse_salary(input) {
            Ok(salary) => {
                session.draft.salary = salary;
                advance(session, ConversationState::Experience)
            }
            Err(e) => reject(session, e),
        },
        ConversationState::Experience => match parse_experience(input) {
            Ok(years) => {
                session.draft.experience_years = years;
                advance(session, ConversationState::Language)
            }
            Err(e) => reject(session, e),
        },
        ConversationState::Language => {
            session.draft.requires_english = parse_yes_no(input);
            advance(session, ConversationState::Keywords)
        }
        ConversationState::Keywords => {
            session.draft.keywords = split_keywords(input);
            advance(session, ConversationState::Site)
        }
        ConversationState::Site => match input.parse::<Site>() {
            Ok(site) => {
                session.draft.site = Some(site);
                advance(session, ConversationState::Count)
            }
            Err(_) => reject(session, "Invalid choice. Please select 1 or 2."),
        },
        ConversationState::Count => match parse_result_limit(input) {
            Ok(limit) => {
                session.draft.result_limit = limit;
                finish(session)
            }
            Err(e) => reject(session, e),
        },
        ConversationState::Done => {
            let (fresh, _) = start_with_id(session.id);
            step(fresh, input)
        }
    }
}

fn finish(mut session: Session) -> (Session, Effect) {
    let draft = &session.draft;
    let site = draft.site.unwrap_or(Site::WorkUa);

    let built = SearchCriteria::new(draft.job_position.as_deref().unwrap_or_default()).and_then(
        |criteria| {
            criteria
                .with_location(draft.location.clone())
                .with_salary(draft.salary)
                .with_experience_years(draft.experience_years)
                .with_requires_english(draft.requires_english)
                .with_keywords(draft.keywords.clone())
                .with_result_limit(draft.result_limit)
        },
    );

    match built {
        Ok(criteria) => {
            session.state = ConversationState::Done;
            (session, Effect::Search { criteria, site })
        }
        Err(e) => {
            // Only reachable if the draft was edited by hand
            let (fresh, _) = start_with_id(session.id);
            reject(fresh, e)
        }
    }
}
