use crate::core::error::{DeckError, Result};
use crate::deck::slides::Slide;

/// Button state for one rendered slide. Neighbours come from the deck bounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NavState {
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

impl NavState {
    pub fn prev_disabled(&self) -> bool {
        self.prev.is_none()
    }

    pub fn next_disabled(&self) -> bool {
        self.next.is_none()
    }
}

#[derive(Debug)]
pub struct RenderedSlide<'a> {
    pub index: usize,
    pub slide: &'a Slide,
    pub nav: NavState,
}

/// Owns the slide list and the current position in it.
///
/// The index only changes through `initialize`, `goto` and `advance`, and a
/// rejected move leaves it where it was.
#[derive(Debug)]
pub struct SlideController {
    slides: Vec<Slide>,
    index: usize,
}

impl SlideController {
    pub fn new(slides: Vec<Slide>) -> Result<Self> {
        if slides.is_empty() {
            return Err(DeckError::EmptyDeck);
        }
        Ok(Self { slides, index: 0 })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn last_index(&self) -> usize {
        self.slides.len() - 1
    }

    pub fn initialize(&mut self) -> RenderedSlide<'_> {
        self.index = 0;
        self.view(0)
    }

    pub fn goto(&mut self, index: usize) -> Result<RenderedSlide<'_>> {
        self.check(index as isize)?;
        self.index = index;
        Ok(self.view(index))
    }

    pub fn advance(&mut self, delta: isize) -> Result<RenderedSlide<'_>> {
        let target = self.index as isize + delta;
        let index = self.check(target)?;
        self.index = index;
        Ok(self.view(index))
    }

    /// Renders any slide without moving the current position.
    pub fn render(&self, index: usize) -> Result<RenderedSlide<'_>> {
        self.check(index as isize)?;
        Ok(self.view(index))
    }

    fn check(&self, index: isize) -> Result<usize> {
        if index < 0 || index as usize >= self.slides.len() {
            return Err(DeckError::IndexOutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        Ok(index as usize)
    }

    fn view(&self, index: usize) -> RenderedSlide<'_> {
        let last = self.last_index();
        RenderedSlide {
            index,
            slide: &self.slides[index],
            nav: NavState {
                prev: if index == 0 { None } else { Some(index - 1) },
                next: if index >= last { None } else { Some(index + 1) },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::slides::housing_story;

    fn deck() -> SlideController {
        SlideController::new(housing_story()).unwrap()
    }

    #[test]
    fn buttons_disable_exactly_at_the_edges() {
        let c = deck();
        let n = c.len();
        for i in 0..n {
            let view = c.render(i).unwrap();
            assert_eq!(view.nav.prev_disabled(), i == 0, "prev at {i}");
            assert_eq!(view.nav.next_disabled(), i == n - 1, "next at {i}");
        }
    }

    #[test]
    fn initialize_starts_at_the_first_slide() {
        let mut c = deck();
        c.goto(2).unwrap();
        let view = c.initialize();
        assert_eq!(view.index, 0);
        assert_eq!(view.slide.id, "scene1");
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn advance_walks_the_deck() {
        let mut c = deck();
        c.initialize();
        assert_eq!(c.advance(1).unwrap().index, 1);
        assert_eq!(c.advance(2).unwrap().index, 3);
        assert_eq!(c.advance(-3).unwrap().index, 0);
    }

    #[test]
    fn moving_past_either_end_is_rejected_and_keeps_the_index() {
        let mut c = deck();
        c.initialize();
        assert!(matches!(
            c.advance(-1),
            Err(DeckError::IndexOutOfRange { index: -1, len: 4 })
        ));
        assert_eq!(c.index(), 0);

        c.goto(3).unwrap();
        assert!(matches!(
            c.advance(1),
            Err(DeckError::IndexOutOfRange { index: 4, len: 4 })
        ));
        assert_eq!(c.index(), 3);
        assert!(c.goto(10).is_err());
        assert!(c.render(4).is_err());
    }

    #[test]
    fn empty_deck_is_rejected() {
        assert!(matches!(
            SlideController::new(Vec::new()),
            Err(DeckError::EmptyDeck)
        ));
    }
}
