//! # Dialogue engine
//!
//! A small finite-state machine that turns one user utterance into one or more
//! assistant replies.
//!
//! ```text
//!            "Check Ingredients"            recipe found
//!   ┌──────┐ ─────────────────▶ waiting_ingredient ─────────┐
//!   │ menu │ "Check Cooking Steps"                           ▼
//!   │      │ ─────────────────▶ waiting_direction ──▶ ask_another ──"yes"──┐
//!   └──────┘ ◀──────── "no" / no more results ────────  ▲     └──────────┘
//!      │  free text mentioning ingredients/steps/"how to"  │
//!      └───────────────────────────────────────────────────┘
//! ```
//!
//! Each turn is processed by [`DialogueEngine::submit`], which takes the current
//! [`ConversationState`] by reference and returns the next one. The engine keeps no
//! session data of its own, so one engine (and the retriever inside it) can serve any
//! number of independent conversations.
//!
//! ## Intent matching
//! Utterances are classified by **case-insensitive substring containment**, not
//! whole-word matching. "yes" inside "Yesterday's Stew" counts as a yes, and "hi"
//! inside "chicken" counts as a greeting if nothing earlier in the menu order
//! matched. The menu order is ingredient, step/direction, greeting, thanks, then
//! "how to"/"make", so "how to make chicken curry" gets the greeting reply. Search
//! queries are cleaned by deleting mode phrases ("ingredients for", "steps", …) from
//! the lowercased text.

use crate::config::DIALOGUE_TOP_K;
use crate::corpus::Recipe;
use crate::error::Result;
use crate::formatter::{format_list, format_steps};
use crate::retriever::RecipeFinder;

pub const GREETING: &str = "Hello! 👋 What would you like to do today? You can choose an option below or type your question directly.";
pub const ASK_RECIPE_NAME: &str = "Sure! What is the name of the recipe you want to check?";
pub const ASK_ANOTHER: &str = "Do you want to see another recipe? (yes/no)";
pub const NOT_FOUND_TRY_AGAIN: &str = "Sorry, I couldn’t find that recipe. 😔 Please try another name.";
pub const NOT_FOUND_INGREDIENTS: &str = "Sorry, I couldn’t find the ingredients for that recipe. 😔";
pub const NOT_FOUND_STEPS: &str = "Sorry, I couldn’t find the cooking steps for that recipe. 😔";
pub const NOT_FOUND: &str = "Sorry, I couldn’t find that recipe. 😔";
pub const NO_MORE_RESULTS: &str = "No more similar recipes found. 😔";
pub const DECLINED: &str = "Okay! You can type another recipe name anytime. 🍳";
pub const GREETING_REPLY: &str = "Hi there! 😊 How can I help you with your cooking today?";
pub const THANKS_REPLY: &str = "You're welcome! Let me know if you need anything else. 🍀";
pub const HELP: &str =
    "I can help you with ingredients or cooking steps. Just mention the recipe name. 🍳";

const INGREDIENT_PHRASES: &[&str] = &["ingredients for", "ingredients"];
const STEP_PHRASES: &[&str] = &["steps for", "directions for", "steps", "directions"];
const HOW_TO_PHRASES: &[&str] = &["how to", "make"];
const GREETINGS: &[&str] = &["hello", "hi", "hai", "hey"];

/// Conversation mode: decides how the next utterance is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Menu,
    WaitingIngredient,
    WaitingDirection,
    AskAnother,
}

/// How pending results are rendered when the user pages through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingKind {
    #[default]
    Ingredient,
    Step,
    /// Ingredients followed by steps, from "how to make …" questions.
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// What the presentation layer submits each turn.
#[derive(Debug, Clone, PartialEq)]
pub enum UserInput {
    /// The "Check Ingredients" button.
    CheckIngredients,
    /// The "Check Cooking Steps" button.
    CheckCookingSteps,
    Text(String),
}

impl From<&str> for UserInput {
    fn from(text: &str) -> Self {
        UserInput::Text(text.to_string())
    }
}

/// Everything one conversation remembers between turns.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationState {
    /// Append-only; every turn adds one user message and at least one reply.
    pub transcript: Vec<ChatMessage>,
    pub mode: Mode,
    /// Matches from the latest successful search, nearest first.
    pub pending_results: Vec<Recipe>,
    /// Position of the result currently shown in `pending_results`.
    pub pending_cursor: usize,
    pub pending_kind: PendingKind,
}

impl ConversationState {
    /// A fresh session: menu mode and the greeting.
    pub fn new() -> Self {
        Self {
            transcript: vec![ChatMessage::assistant(GREETING)],
            mode: Mode::Menu,
            pending_results: Vec::new(),
            pending_cursor: 0,
            pending_kind: PendingKind::default(),
        }
    }

    fn say(&mut self, content: impl Into<String>) {
        self.transcript.push(ChatMessage::assistant(content));
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

/// An utterance interpreted in the light of the current mode.
#[derive(Debug, Clone, PartialEq)]
enum Intent {
    ChooseIngredients,
    ChooseSteps,
    /// Free text while waiting for a recipe name, searched verbatim.
    RecipeName(String),
    Affirm,
    Decline,
    /// Menu questions; the payload is the cleaned search query.
    Ingredients(String),
    Steps(String),
    HowTo(String),
    Greet,
    Thank,
    Help,
}

fn mentions(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

/// Delete every phrase (in order) and trim.
fn clean_query(text: &str, phrases: &[&str]) -> String {
    phrases
        .iter()
        .fold(text.to_string(), |acc, phrase| acc.replace(phrase, ""))
        .trim()
        .to_string()
}

fn classify(mode: Mode, input: &UserInput) -> Intent {
    let text = match input {
        UserInput::CheckIngredients => return Intent::ChooseIngredients,
        UserInput::CheckCookingSteps => return Intent::ChooseSteps,
        UserInput::Text(text) => text,
    };
    let lower = text.to_lowercase();

    match mode {
        Mode::WaitingIngredient | Mode::WaitingDirection => Intent::RecipeName(text.clone()),
        Mode::AskAnother if lower.contains("yes") => Intent::Affirm,
        Mode::AskAnother => Intent::Decline,
        Mode::Menu if lower.contains("ingredient") => {
            Intent::Ingredients(clean_query(&lower, INGREDIENT_PHRASES))
        }
        Mode::Menu if lower.contains("step") || lower.contains("direction") => {
            Intent::Steps(clean_query(&lower, STEP_PHRASES))
        }
        Mode::Menu if mentions(&lower, GREETINGS) => Intent::Greet,
        Mode::Menu if lower.contains("thank") => Intent::Thank,
        Mode::Menu if mentions(&lower, HOW_TO_PHRASES) => {
            Intent::HowTo(clean_query(&lower, HOW_TO_PHRASES))
        }
        Mode::Menu => Intent::Help,
    }
}

/// Render one recipe the way `kind` asks for.
pub fn describe(recipe: &Recipe, kind: PendingKind) -> String {
    match kind {
        PendingKind::Ingredient => format!(
            "Here are the ingredients for **{}**:\n\n{}",
            recipe.title,
            format_list(&recipe.ingredients)
        ),
        PendingKind::Step => format!(
            "Here are the cooking steps for **{}**:\n\n{}",
            recipe.title,
            format_steps(&recipe.directions)
        ),
        PendingKind::Both => format!(
            "To make **{}**, you have to prepare these ingredients:\n\n{}\n\n\
             After preparing the ingredients, you can follow these cooking steps:\n\n{}",
            recipe.title,
            format_list(&recipe.ingredients),
            format_steps(&recipe.directions)
        ),
    }
}

/// Drives conversations against a [`RecipeFinder`].
pub struct DialogueEngine<F> {
    finder: F,
    top_k: usize,
}

impl<F: RecipeFinder> DialogueEngine<F> {
    pub fn new(finder: F) -> Self {
        Self {
            finder,
            top_k: DIALOGUE_TOP_K,
        }
    }

    /// How many matches each search keeps for paging.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn finder(&self) -> &F {
        &self.finder
    }

    /// Process one turn and return the next state.
    ///
    /// Blank text is ignored: the returned state equals `state`. Otherwise the user
    /// message and the replies are appended and the mode is advanced per the
    /// transition table below.
    ///
    /// # Errors
    /// Only encoder/index failures inside the finder. The caller still holds the
    /// previous `state`, so a failed turn changes nothing.
    pub fn submit(
        &self,
        state: &ConversationState,
        input: &UserInput,
    ) -> Result<ConversationState> {
        let user_text = match input {
            UserInput::CheckIngredients => "Check Ingredients",
            UserInput::CheckCookingSteps => "Check Cooking Steps",
            UserInput::Text(text) if text.trim().is_empty() => return Ok(state.clone()),
            UserInput::Text(text) => text.as_str(),
        };

        let intent = classify(state.mode, input);
        tracing::debug!("Mode {:?}, intent {:?}", state.mode, intent);

        let mut next = state.clone();
        next.transcript.push(ChatMessage::user(user_text));

        match (state.mode, intent) {
            (_, Intent::ChooseIngredients) => {
                next.say(ASK_RECIPE_NAME);
                next.mode = Mode::WaitingIngredient;
            }
            (_, Intent::ChooseSteps) => {
                next.say(ASK_RECIPE_NAME);
                next.mode = Mode::WaitingDirection;
            }
            (Mode::WaitingIngredient, Intent::RecipeName(query)) => {
                self.lookup(
                    &mut next,
                    &query,
                    PendingKind::Ingredient,
                    NOT_FOUND_TRY_AGAIN,
                    Mode::WaitingIngredient,
                )?;
            }
            (Mode::WaitingDirection, Intent::RecipeName(query)) => {
                self.lookup(
                    &mut next,
                    &query,
                    PendingKind::Step,
                    NOT_FOUND_TRY_AGAIN,
                    Mode::WaitingDirection,
                )?;
            }
            (Mode::AskAnother, Intent::Affirm) => {
                next.pending_cursor += 1;
                match next.pending_results.get(next.pending_cursor) {
                    Some(recipe) => {
                        let reply = describe(recipe, next.pending_kind);
                        next.say(reply);
                        next.say(ASK_ANOTHER);
                    }
                    None => {
                        next.say(NO_MORE_RESULTS);
                        next.mode = Mode::Menu;
                    }
                }
            }
            (Mode::AskAnother, Intent::Decline) => {
                next.say(DECLINED);
                next.mode = Mode::Menu;
            }
            (Mode::Menu, Intent::Ingredients(query)) => {
                self.lookup(
                    &mut next,
                    &query,
                    PendingKind::Ingredient,
                    NOT_FOUND_INGREDIENTS,
                    Mode::WaitingIngredient,
                )?;
            }
            (Mode::Menu, Intent::Steps(query)) => {
                self.lookup(
                    &mut next,
                    &query,
                    PendingKind::Step,
                    NOT_FOUND_STEPS,
                    Mode::WaitingDirection,
                )?;
            }
            (Mode::Menu, Intent::HowTo(query)) => {
                self.lookup(
                    &mut next,
                    &query,
                    PendingKind::Both,
                    NOT_FOUND,
                    Mode::WaitingDirection,
                )?;
            }
            (Mode::Menu, Intent::Greet) => next.say(GREETING_REPLY),
            (Mode::Menu, Intent::Thank) => next.say(THANKS_REPLY),
            (mode, intent) => {
                if intent != Intent::Help {
                    tracing::warn!("No transition for {:?} in {:?}", intent, mode);
                }
                next.say(HELP);
            }
        }

        tracing::debug!("Mode {:?} -> {:?}", state.mode, next.mode);
        Ok(next)
    }

    /// Search, then either start paging through the hits or apologize.
    fn lookup(
        &self,
        state: &mut ConversationState,
        query: &str,
        kind: PendingKind,
        apology: &str,
        mode_on_miss: Mode,
    ) -> Result<()> {
        let results = self.finder.find(query, self.top_k)?;

        let Some(first) = results.first() else {
            state.say(apology);
            state.mode = mode_on_miss;
            return Ok(());
        };

        state.say(describe(first, kind));
        state.say(ASK_ANOTHER);
        state.pending_results = results;
        state.pending_cursor = 0;
        state.pending_kind = kind;
        state.mode = Mode::AskAnother;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecipeError;
    use crate::testing::{KeywordEncoder, kitchen_retriever};
    use crate::index::FlatIndex;
    use crate::retriever::RecipeRetriever;

    type KitchenEngine = DialogueEngine<RecipeRetriever<KeywordEncoder, FlatIndex>>;

    fn engine() -> KitchenEngine {
        DialogueEngine::new(kitchen_retriever())
    }

    fn say(engine: &KitchenEngine, state: &ConversationState, text: &str) -> ConversationState {
        engine.submit(state, &UserInput::from(text)).unwrap()
    }

    fn last(state: &ConversationState, n: usize) -> Vec<&str> {
        state.transcript[state.transcript.len() - n..]
            .iter()
            .map(|m| m.content.as_str())
            .collect()
    }

    #[test]
    fn test_new_session() {
        let state = ConversationState::new();
        assert_eq!(state.mode, Mode::Menu);
        assert_eq!(state.transcript, vec![ChatMessage::assistant(GREETING)]);
        assert!(state.pending_results.is_empty());
    }

    #[test]
    fn test_check_ingredients_then_paging() {
        let engine = engine();
        let state = ConversationState::new();

        let state = engine.submit(&state, &UserInput::CheckIngredients).unwrap();
        assert_eq!(state.mode, Mode::WaitingIngredient);
        assert_eq!(state.transcript.len(), 3);
        assert_eq!(state.transcript[1], ChatMessage::user("Check Ingredients"));
        assert_eq!(last(&state, 1), vec![ASK_RECIPE_NAME]);

        let state = say(&engine, &state, "Garlic Pasta");
        assert_eq!(state.mode, Mode::AskAnother);
        assert_eq!(state.pending_cursor, 0);
        assert_eq!(state.pending_kind, PendingKind::Ingredient);
        assert_eq!(state.pending_results.len(), 2);
        assert_eq!(
            last(&state, 2),
            vec![
                "Here are the ingredients for **Garlic Pasta**:\n\n- spaghetti\n- garlic\n- olive oil",
                ASK_ANOTHER
            ]
        );

        let state = say(&engine, &state, "yes");
        assert_eq!(state.mode, Mode::AskAnother);
        assert_eq!(state.pending_cursor, 1);
        assert_eq!(
            last(&state, 2),
            vec![
                "Here are the ingredients for **Tomato Pasta**:\n\n- penne\n- tomato sauce",
                ASK_ANOTHER
            ]
        );

        let state = say(&engine, &state, "YES please");
        assert_eq!(state.mode, Mode::Menu);
        assert_eq!(state.pending_cursor, 2);
        assert_eq!(last(&state, 2), vec!["YES please", NO_MORE_RESULTS]);
    }

    #[test]
    fn test_check_cooking_steps() {
        let engine = engine();
        let state = engine
            .submit(&ConversationState::new(), &UserInput::CheckCookingSteps)
            .unwrap();
        assert_eq!(state.mode, Mode::WaitingDirection);

        let state = say(&engine, &state, "Tomato Soup");
        assert_eq!(state.pending_kind, PendingKind::Step);
        assert_eq!(
            last(&state, 2)[0],
            "Here are the cooking steps for **Tomato Soup**:\n\n1. Simmer the tomatoes\n2. Blend until smooth"
        );
    }

    #[test]
    fn test_unknown_recipe_keeps_waiting() {
        let engine = engine();
        let state = engine
            .submit(&ConversationState::new(), &UserInput::CheckCookingSteps)
            .unwrap();
        let before = state.transcript.len();

        let state = say(&engine, &state, "totally-fake-dish-name");
        assert_eq!(state.mode, Mode::WaitingDirection);
        assert_eq!(state.transcript.len(), before + 2);
        assert_eq!(last(&state, 1), vec![NOT_FOUND_TRY_AGAIN]);
    }

    #[test]
    fn test_blank_input_is_a_no_op() {
        let engine = engine();
        let state = ConversationState::new();
        assert_eq!(say(&engine, &state, ""), state);
        assert_eq!(say(&engine, &state, "   "), state);
    }

    #[test]
    fn test_decline_returns_to_menu() {
        let engine = engine();
        let state = say(&engine, &ConversationState::new(), "ingredients for chocolate cake");
        assert_eq!(state.mode, Mode::AskAnother);

        let state = say(&engine, &state, "no thanks");
        assert_eq!(state.mode, Mode::Menu);
        assert_eq!(last(&state, 1), vec![DECLINED]);
    }

    #[test]
    fn test_menu_ingredient_question() {
        let engine = engine();
        let state = say(&engine, &ConversationState::new(), "Ingredients for Chocolate Cake");
        assert_eq!(state.mode, Mode::AskAnother);
        assert_eq!(state.pending_results[0].title, "Chocolate Cake");
        assert_eq!(
            last(&state, 2)[0],
            "Here are the ingredients for **Chocolate Cake**:\n\n- flour\n- cocoa\n- sugar"
        );
    }

    #[test]
    fn test_menu_step_question() {
        let engine = engine();
        let state = say(&engine, &ConversationState::new(), "directions for tomato soup");
        assert_eq!(state.mode, Mode::AskAnother);
        assert_eq!(state.pending_kind, PendingKind::Step);
        assert_eq!(state.pending_results[0].title, "Tomato Soup");
    }

    #[test]
    fn test_menu_misses_switch_to_waiting() {
        let engine = engine();

        let state = say(&engine, &ConversationState::new(), "ingredients for xyzzy");
        assert_eq!(state.mode, Mode::WaitingIngredient);
        assert_eq!(last(&state, 1), vec![NOT_FOUND_INGREDIENTS]);

        let state = say(&engine, &ConversationState::new(), "steps for xyzzy");
        assert_eq!(state.mode, Mode::WaitingDirection);
        assert_eq!(last(&state, 1), vec![NOT_FOUND_STEPS]);

        let state = say(&engine, &ConversationState::new(), "how to make xyzzy");
        assert_eq!(state.mode, Mode::WaitingDirection);
        assert_eq!(last(&state, 1), vec![NOT_FOUND]);
    }

    #[test]
    fn test_how_to_shows_both_and_pages_both() {
        let engine = engine();
        let state = say(&engine, &ConversationState::new(), "How to make garlic pasta?");
        assert_eq!(state.mode, Mode::AskAnother);
        assert_eq!(state.pending_kind, PendingKind::Both);
        assert_eq!(
            last(&state, 2)[0],
            "To make **Garlic Pasta**, you have to prepare these ingredients:\n\n\
             - spaghetti\n- garlic\n- olive oil\n\n\
             After preparing the ingredients, you can follow these cooking steps:\n\n\
             1. Boil the pasta\n2. Fry the garlic\n3. Toss together"
        );

        let state = say(&engine, &state, "yes");
        assert!(last(&state, 2)[0].starts_with("To make **Tomato Pasta**"));
    }

    #[test]
    fn test_small_talk() {
        let engine = engine();
        let start = ConversationState::new();

        let state = say(&engine, &start, "Hello there");
        assert_eq!(state.mode, Mode::Menu);
        assert_eq!(last(&state, 1), vec![GREETING_REPLY]);

        let state = say(&engine, &start, "thank you!");
        assert_eq!(last(&state, 1), vec![THANKS_REPLY]);

        let state = say(&engine, &start, "what can you do");
        assert_eq!(state.mode, Mode::Menu);
        assert_eq!(last(&state, 1), vec![HELP]);
    }

    #[test]
    fn test_non_string_ingredients_pass_through() {
        let engine = engine();
        let state = say(&engine, &ConversationState::new(), "ingredients for lemon cake");
        assert_eq!(state.pending_results[0].title, "Lemon Cake");
        assert_eq!(
            last(&state, 2)[0],
            "Here are the ingredients for **Lemon Cake**:\n\nnull"
        );
    }

    #[test]
    fn test_yes_is_substring_matched() {
        let engine = engine();
        let state = say(&engine, &ConversationState::new(), "ingredients for garlic pasta");
        let state = say(&engine, &state, "Yesterday's Stew");
        assert_eq!(state.pending_cursor, 1);
        assert_eq!(state.mode, Mode::AskAnother);
    }

    #[test]
    fn test_buttons_work_from_any_mode() {
        let engine = engine();
        let state = say(&engine, &ConversationState::new(), "ingredients for garlic pasta");
        assert_eq!(state.mode, Mode::AskAnother);

        let state = engine.submit(&state, &UserInput::CheckCookingSteps).unwrap();
        assert_eq!(state.mode, Mode::WaitingDirection);
    }

    #[test]
    fn test_small_talk_wins_over_how_to() {
        let menu = |text: &str| classify(Mode::Menu, &UserInput::from(text));
        // "chicken" contains "hi".
        assert_eq!(menu("how to make chicken curry"), Intent::Greet);
        assert_eq!(menu("thanks! how to make pasta"), Intent::Thank);
        assert_eq!(
            menu("how to make garlic pasta"),
            Intent::HowTo("garlic pasta".to_string())
        );
        assert_eq!(
            menu("ingredients for chicken curry"),
            Intent::Ingredients("chicken curry".to_string())
        );

        let engine = engine();
        let state = say(&engine, &ConversationState::new(), "How to make chicken curry?");
        assert_eq!(state.mode, Mode::Menu);
        assert_eq!(last(&state, 1), vec![GREETING_REPLY]);
    }

    #[test]
    fn test_clean_query() {
        assert_eq!(clean_query("ingredients for pizza", INGREDIENT_PHRASES), "pizza");
        assert_eq!(clean_query("pizza steps", STEP_PHRASES), "pizza");
        assert_eq!(clean_query("how to make pizza", HOW_TO_PHRASES), "pizza");
        // Substring removal also eats parts of words.
        assert_eq!(clean_query("remake pizza", HOW_TO_PHRASES), "re pizza");
    }

    struct BrokenFinder;

    impl RecipeFinder for BrokenFinder {
        fn find(&self, _query: &str, _k: usize) -> Result<Vec<Recipe>> {
            Err(RecipeError::Index("index unavailable".into()))
        }
    }

    #[test]
    fn test_finder_error_fails_the_turn() {
        let engine = DialogueEngine::new(BrokenFinder);
        let state = engine
            .submit(&ConversationState::new(), &UserInput::CheckIngredients)
            .unwrap();

        assert!(engine.submit(&state, &UserInput::from("pasta")).is_err());
        assert_eq!(state.mode, Mode::WaitingIngredient);
    }

    /// Always returns the same two recipes.
    struct TwoResults;

    impl RecipeFinder for TwoResults {
        fn find(&self, _query: &str, k: usize) -> Result<Vec<Recipe>> {
            Ok(vec![
                Recipe::new("First", "a", "b"),
                Recipe::new("Second", "c", "d"),
            ]
            .into_iter()
            .take(k)
            .collect())
        }
    }

    #[test]
    fn test_two_yes_replies_exhaust_results() {
        let engine = DialogueEngine::new(TwoResults);
        let state = engine
            .submit(&ConversationState::new(), &UserInput::CheckIngredients)
            .unwrap();
        let state = engine.submit(&state, &UserInput::from("anything")).unwrap();
        let state = engine.submit(&state, &UserInput::from("yes")).unwrap();
        assert_eq!(state.mode, Mode::AskAnother);
        let state = engine.submit(&state, &UserInput::from("yes")).unwrap();
        assert_eq!(state.mode, Mode::Menu);
        assert_eq!(state.transcript.last().unwrap().content, NO_MORE_RESULTS);
    }

    #[test]
    fn test_top_k_limits_paging() {
        let engine = DialogueEngine::new(TwoResults).with_top_k(1);
        let state = say_with(&engine, ConversationState::new(), "ingredients for anything");
        assert_eq!(state.pending_results.len(), 1);
        let state = say_with(&engine, state, "yes");
        assert_eq!(state.mode, Mode::Menu);
    }

    fn say_with<F: RecipeFinder>(
        engine: &DialogueEngine<F>,
        state: ConversationState,
        text: &str,
    ) -> ConversationState {
        engine.submit(&state, &UserInput::from(text)).unwrap()
    }
}
