//! # Dialog Prompt
//!
//! A sequential text box. It shows an ordered list of pages, one page per
//! confirmation, and can reveal each page a character at a time.

use crate::{EngineError, EngineResult};
use std::time::Duration;

/// Visibility and page cursor of the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PromptState {
    #[default]
    Hidden,
    Shown { pages: Vec<String>, index: usize },
}

/// Outcome of [`Prompt::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAdvance {
    /// Another page is now displayed
    MoreRemaining,
    /// The last page was already displayed; the caller decides whether to hide
    Exhausted,
}

/// In-flight character reveal for the current page.
#[derive(Debug, Clone)]
struct Typewriter {
    chars: Vec<char>,
    revealed: usize,
    interval: Duration,
    elapsed: Duration,
}

impl Typewriter {
    fn new(text: &str, interval: Duration) -> Self {
        Self {
            chars: text.chars().collect(),
            revealed: 0,
            interval,
            elapsed: Duration::ZERO,
        }
    }

    fn is_done(&self) -> bool {
        self.revealed >= self.chars.len()
    }

    /// Appends the next visible character. Line breaks ride along with the
    /// character after them.
    fn reveal_next(&mut self, out: &mut String) {
        while let Some(&ch) = self.chars.get(self.revealed) {
            self.revealed += 1;
            out.push(ch);
            if ch != '\n' {
                break;
            }
        }
    }

    fn advance(&mut self, dt: Duration, out: &mut String) {
        self.elapsed += dt;
        while self.elapsed >= self.interval && !self.is_done() {
            self.elapsed -= self.interval;
            self.reveal_next(out);
        }
    }
}

/// The dialog prompt.
///
/// # Examples
///
/// ```
/// use tilewalk::{Prompt, PromptAdvance};
///
/// let mut prompt = Prompt::new(None);
/// prompt.show(vec!["a".to_string(), "b".to_string()]).unwrap();
/// assert_eq!(prompt.content(), "a");
/// assert_eq!(prompt.advance().unwrap(), PromptAdvance::MoreRemaining);
/// assert_eq!(prompt.advance().unwrap(), PromptAdvance::Exhausted);
/// prompt.hide();
/// assert!(!prompt.is_shown());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Prompt {
    state: PromptState,
    content: String,
    typing_speed: Option<Duration>,
    typing: Option<Typewriter>,
}

impl Prompt {
    /// Creates a hidden prompt. With a typing speed every page is revealed one
    /// character per interval; without one pages appear whole.
    pub fn new(typing_speed: Option<Duration>) -> Self {
        Self {
            state: PromptState::Hidden,
            content: String::new(),
            typing_speed: typing_speed.filter(|speed| !speed.is_zero()),
            typing: None,
        }
    }

    pub fn state(&self) -> &PromptState {
        &self.state
    }

    pub fn is_shown(&self) -> bool {
        matches!(self.state, PromptState::Shown { .. })
    }

    /// Whether a page is still being revealed.
    pub fn is_typing(&self) -> bool {
        self.typing.is_some()
    }

    /// Text currently visible in the box.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Full text of the current page, regardless of typing progress.
    pub fn current_page(&self) -> Option<&str> {
        match &self.state {
            PromptState::Shown { pages, index } => pages.get(*index).map(String::as_str),
            PromptState::Hidden => None,
        }
    }

    /// Shows `pages` starting from the first one.
    pub fn show(&mut self, pages: Vec<String>) -> EngineResult<()> {
        if self.is_shown() {
            return Err(EngineError::PromptAlreadyShown);
        }
        if pages.is_empty() {
            return Err(EngineError::EmptyPrompt);
        }

        self.state = PromptState::Shown { pages, index: 0 };
        self.display_current_page();
        Ok(())
    }

    /// Moves to the next page, or reports that the last page is on screen.
    pub fn advance(&mut self) -> EngineResult<PromptAdvance> {
        let PromptState::Shown { pages, index } = &mut self.state else {
            return Err(EngineError::PromptHidden);
        };

        if *index + 1 >= pages.len() {
            return Ok(PromptAdvance::Exhausted);
        }

        *index += 1;
        self.display_current_page();
        Ok(PromptAdvance::MoreRemaining)
    }

    /// Hides the prompt, cancelling any reveal in progress. Valid in any state.
    pub fn hide(&mut self) {
        self.typing = None;
        self.content.clear();
        self.state = PromptState::Hidden;
    }

    /// Advances the typewriter by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(typing) = self.typing.as_mut() {
            typing.advance(dt, &mut self.content);
            if typing.is_done() {
                self.typing = None;
            }
        }
    }

    fn display_current_page(&mut self) {
        self.typing = None;
        self.content.clear();

        let Some(page) = self.current_page().map(str::to_string) else {
            return;
        };

        match self.typing_speed {
            Some(speed) if !page.is_empty() => {
                self.typing = Some(Typewriter::new(&page, speed));
            }
            _ => self.content = page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|text| text.to_string()).collect()
    }

    #[test]
    fn test_prompt_sequencing() {
        let mut prompt = Prompt::new(None);
        prompt.show(pages(&["a", "b", "c"])).unwrap();
        assert_eq!(prompt.content(), "a");

        assert_eq!(prompt.advance().unwrap(), PromptAdvance::MoreRemaining);
        assert_eq!(prompt.content(), "b");
        assert_eq!(prompt.advance().unwrap(), PromptAdvance::MoreRemaining);
        assert_eq!(prompt.content(), "c");
        assert_eq!(prompt.advance().unwrap(), PromptAdvance::Exhausted);
        assert!(prompt.is_shown());

        prompt.hide();
        assert!(!prompt.is_shown());
        assert_eq!(prompt.content(), "");
        assert_eq!(prompt.state(), &PromptState::Hidden);
    }

    #[test]
    fn test_show_while_shown_is_rejected() {
        let mut prompt = Prompt::new(None);
        prompt.show(pages(&["first"])).unwrap();
        assert!(matches!(
            prompt.show(pages(&["second"])),
            Err(EngineError::PromptAlreadyShown)
        ));
        assert_eq!(prompt.content(), "first");
    }

    #[test]
    fn test_show_without_pages_is_rejected() {
        let mut prompt = Prompt::new(None);
        assert!(matches!(prompt.show(Vec::new()), Err(EngineError::EmptyPrompt)));
        assert!(!prompt.is_shown());
    }

    #[test]
    fn test_advance_while_hidden_is_rejected() {
        let mut prompt = Prompt::new(None);
        assert!(matches!(prompt.advance(), Err(EngineError::PromptHidden)));
    }

    #[test]
    fn test_hide_resets_index() {
        let mut prompt = Prompt::new(None);
        prompt.show(pages(&["a", "b"])).unwrap();
        prompt.advance().unwrap();
        prompt.hide();
        prompt.show(pages(&["x", "y"])).unwrap();
        assert_eq!(
            prompt.state(),
            &PromptState::Shown {
                pages: pages(&["x", "y"]),
                index: 0
            }
        );
    }

    #[test]
    fn test_typewriter_reveals_one_character_per_interval() {
        let mut prompt = Prompt::new(Some(Duration::from_millis(50)));
        prompt.show(pages(&["desk"])).unwrap();
        assert!(prompt.is_typing());
        assert_eq!(prompt.content(), "");

        prompt.tick(Duration::from_millis(50));
        assert_eq!(prompt.content(), "d");
        prompt.tick(Duration::from_millis(120));
        assert_eq!(prompt.content(), "des");
        prompt.tick(Duration::from_millis(50));
        assert_eq!(prompt.content(), "desk");
        assert!(!prompt.is_typing());
    }

    #[test]
    fn test_typewriter_carries_line_breaks_with_next_character() {
        let mut prompt = Prompt::new(Some(Duration::from_millis(10)));
        prompt.show(pages(&["ab\ncd"])).unwrap();
        prompt.tick(Duration::from_millis(30));
        assert_eq!(prompt.content(), "ab\nc");
    }

    #[test]
    fn test_hide_cancels_typing() {
        let mut prompt = Prompt::new(Some(Duration::from_millis(50)));
        prompt.show(pages(&["a small building"])).unwrap();
        prompt.tick(Duration::from_millis(100));
        prompt.hide();
        assert!(!prompt.is_typing());

        prompt.tick(Duration::from_secs(5));
        assert_eq!(prompt.content(), "");
    }

    #[test]
    fn test_advance_restarts_typing_for_next_page() {
        let mut prompt = Prompt::new(Some(Duration::from_millis(50)));
        prompt.show(pages(&["a large building", "closed"])).unwrap();
        prompt.tick(Duration::from_millis(100));
        assert_eq!(prompt.content(), "a ");

        prompt.advance().unwrap();
        assert_eq!(prompt.content(), "");
        assert_eq!(prompt.current_page(), Some("closed"));
        prompt.tick(Duration::from_millis(50));
        assert_eq!(prompt.content(), "c");
    }
}
