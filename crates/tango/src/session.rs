//! Study session state.
//!
//! A session owns a working copy of a deck's cards. Known flags set here are
//! never written back to the deck store.
//!
//! The traversal rules live in free functions over card slices so they can be
//! checked on their own; [`StudySession`] only composes them.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::deck::{Card, Deck};

/// Index of the next unknown card after `current`, wrapping around.
///
/// When every card is known this is the plain circular successor. When the
/// only unknown card is `current` itself the scan comes back to `current`.
/// Returns 0 for an empty slice.
#[must_use]
pub fn next_unknown_index(cards: &[Card], current: usize) -> usize {
    let len = cards.len();
    if len == 0 {
        return 0;
    }
    let start = current % len;
    let next = (start + 1) % len;
    if cards.iter().all(|card| card.known) {
        return next;
    }

    let mut index = next;
    while cards[index].known && index != start {
        index = (index + 1) % len;
    }
    index
}

/// Index of the previous unknown card before `current`, wrapping around.
///
/// Mirror of [`next_unknown_index`], including the all-known fallback.
#[must_use]
pub fn prev_unknown_index(cards: &[Card], current: usize) -> usize {
    let len = cards.len();
    if len == 0 {
        return 0;
    }
    let start = current % len;
    let prev = (start + len - 1) % len;
    if cards.iter().all(|card| card.known) {
        return prev;
    }

    let mut index = prev;
    while cards[index].known && index != start {
        index = (index + len - 1) % len;
    }
    index
}

/// Number of cards not yet marked as known.
#[must_use]
pub fn unknown_count(cards: &[Card]) -> usize {
    cards.iter().filter(|card| !card.known).count()
}

/// Percentage of known cards, 0 for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress_percent(cards: &[Card]) -> f64 {
    if cards.is_empty() {
        return 0.0;
    }
    let known = cards.len() - unknown_count(cards);
    (known as f64 / cards.len() as f64) * 100.0
}

/// A copy of `cards` with the card at `index` marked as known.
#[must_use]
pub fn with_known(cards: &[Card], index: usize) -> Vec<Card> {
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| Card {
            known: card.known || i == index,
            ..card.clone()
        })
        .collect()
}

/// A copy of `cards` with every known flag cleared.
#[must_use]
pub fn with_all_unknown(cards: &[Card]) -> Vec<Card> {
    cards
        .iter()
        .map(|card| Card {
            known: false,
            ..card.clone()
        })
        .collect()
}

/// The working set of cards for one study session.
#[derive(Debug, Clone, PartialEq)]
pub struct StudySession {
    cards: Vec<Card>,
    current: usize,
    progress: f64,
}

impl StudySession {
    /// Start a session over a copy of `cards`.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        let progress = progress_percent(&cards);
        Self {
            cards,
            current: 0,
            progress,
        }
    }

    /// Start a session over a copy of the deck's cards.
    #[must_use]
    pub fn for_deck(deck: &Deck) -> Self {
        Self::new(deck.cards.clone())
    }

    /// The working sequence, in current order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Index of the displayed card.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The displayed card, `None` for an empty deck.
    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.current)
    }

    /// Number of cards in the session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the session has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Percentage of cards marked as known.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Number of cards not yet known.
    #[must_use]
    pub fn remaining(&self) -> usize {
        unknown_count(&self.cards)
    }

    /// Number of cards marked as known.
    #[must_use]
    pub fn known_count(&self) -> usize {
        self.cards.len() - self.remaining()
    }

    /// Whether every card is known. False for an empty session.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.remaining() == 0
    }

    /// Move to the next unknown card.
    pub fn advance(&mut self) {
        self.current = next_unknown_index(&self.cards, self.current);
    }

    /// Move to the previous unknown card.
    pub fn retreat(&mut self) {
        self.current = prev_unknown_index(&self.cards, self.current);
    }

    /// Mark the displayed card as known.
    ///
    /// Moves on to the next unknown card while any remain; after the last one
    /// the index stays put so that card stays visible. Returns `false` when
    /// there is nothing to mark (empty session or card already known).
    pub fn mark_current_known(&mut self) -> bool {
        match self.current_card() {
            Some(card) if !card.known => {}
            _ => return false,
        }

        self.set_cards(with_known(&self.cards, self.current));
        debug!(
            "Marked card {} known, {} remaining",
            self.current,
            self.remaining()
        );
        if self.remaining() > 0 {
            self.advance();
        }
        true
    }

    /// Clear every known flag and go back to the first card.
    ///
    /// A previous shuffle is not undone.
    pub fn reset(&mut self) {
        self.set_cards(with_all_unknown(&self.cards));
        self.current = 0;
    }

    /// Shuffle the working sequence with the thread-local generator.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Shuffle the working sequence with `rng`, keeping known flags, and go
    /// back to the first card.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut cards = self.cards.clone();
        cards.shuffle(rng);
        self.set_cards(cards);
        self.current = 0;
    }

    fn set_cards(&mut self, cards: Vec<Card>) {
        self.progress = progress_percent(&cards);
        self.cards = cards;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cards(n: u32) -> Vec<Card> {
        (1..=n)
            .map(|i| Card::new(i, format!("語{i}"), format!("go{i}"), format!("word {i}")))
            .collect()
    }

    fn known(cards: &mut [Card], indices: &[usize]) {
        for &i in indices {
            cards[i].known = true;
        }
    }

    fn ids(cards: &[Card]) -> Vec<u32> {
        let mut ids: Vec<u32> = cards.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_next_unknown_skips_known() {
        let mut deck = cards(5);
        known(&mut deck, &[1, 2]);
        assert_eq!(next_unknown_index(&deck, 0), 3);
        assert_eq!(next_unknown_index(&deck, 4), 0);
    }

    #[test]
    fn test_next_unknown_returns_to_start_when_only_current_unknown() {
        let mut deck = cards(4);
        known(&mut deck, &[0, 1, 3]);
        assert_eq!(next_unknown_index(&deck, 2), 2);
    }

    #[test]
    fn test_next_all_known_plain_increment() {
        let mut deck = cards(3);
        known(&mut deck, &[0, 1, 2]);
        assert_eq!(next_unknown_index(&deck, 0), 1);
        assert_eq!(next_unknown_index(&deck, 2), 0);
    }

    #[test]
    fn test_prev_unknown_skips_known() {
        let mut deck = cards(5);
        known(&mut deck, &[4, 3]);
        assert_eq!(prev_unknown_index(&deck, 0), 2);
        assert_eq!(prev_unknown_index(&deck, 2), 1);
    }

    #[test]
    fn test_prev_all_known_plain_decrement() {
        let mut deck = cards(3);
        known(&mut deck, &[0, 1, 2]);
        assert_eq!(prev_unknown_index(&deck, 0), 2);
        assert_eq!(prev_unknown_index(&deck, 1), 0);
    }

    #[test]
    fn test_traversal_on_empty_slice() {
        assert_eq!(next_unknown_index(&[], 0), 0);
        assert_eq!(prev_unknown_index(&[], 3), 0);
        assert!(progress_percent(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pure_helpers_leave_input_untouched() {
        let deck = cards(3);
        let marked = with_known(&deck, 1);

        assert!(marked[1].known);
        assert!(!deck[1].known);
        assert_eq!(unknown_count(&marked), 2);
        assert_eq!(unknown_count(&with_all_unknown(&marked)), 3);
    }

    #[test]
    fn test_advance_visits_every_unknown_before_repeating() {
        let mut deck = cards(7);
        known(&mut deck, &[1, 4]);
        let mut session = StudySession::new(deck);

        let mut visited = vec![session.current_index()];
        for _ in 0..4 {
            session.advance();
            visited.push(session.current_index());
        }

        assert_eq!(visited, vec![0, 2, 3, 5, 6]);
        session.advance();
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_single_card_scenario() {
        let mut session = StudySession::new(vec![Card::new(1, "はい", "hai", "Yes")]);

        session.advance();
        assert_eq!(session.current_index(), 0);

        assert!(session.mark_current_known());
        assert!(session.cards()[0].known);
        assert_eq!(session.current_index(), 0);
        assert!((session.progress() - 100.0).abs() < f64::EPSILON);
        assert!(session.is_complete());
    }

    #[test]
    fn test_mark_known_advances_while_unknown_remain() {
        let mut session = StudySession::new(cards(3));

        assert!(session.mark_current_known());
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.remaining(), 2);

        assert!(session.mark_current_known());
        assert_eq!(session.current_index(), 2);

        // Last unknown card: stays visible.
        assert!(session.mark_current_known());
        assert_eq!(session.current_index(), 2);
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn test_mark_known_twice_is_noop() {
        let mut session = StudySession::new(cards(1));
        assert!(session.mark_current_known());
        assert!(!session.mark_current_known());
        assert_eq!(session.known_count(), 1);
    }

    #[test]
    fn test_marking_every_card_reaches_full_progress() {
        let mut session = StudySession::new(cards(10));
        for _ in 0..session.len() {
            session.mark_current_known();
        }
        assert!((session.progress() - 100.0).abs() < f64::EPSILON);
        assert!(session.is_complete());
    }

    #[test]
    fn test_progress_partial() {
        let mut session = StudySession::new(cards(4));
        session.mark_current_known();
        assert!((session.progress() - 25.0).abs() < f64::EPSILON);
        assert_eq!(session.known_count(), 1);
    }

    #[test]
    fn test_reset_after_marks_and_shuffles() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = StudySession::new(cards(6));
        session.mark_current_known();
        session.mark_current_known();
        session.shuffle_with(&mut rng);
        session.advance();
        session.mark_current_known();

        session.reset();

        assert_eq!(session.current_index(), 0);
        assert!(session.progress().abs() < f64::EPSILON);
        assert_eq!(session.remaining(), 6);
    }

    #[test]
    fn test_reset_keeps_shuffled_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = StudySession::new(cards(8));
        session.shuffle_with(&mut rng);
        let order: Vec<u32> = session.cards().iter().map(|c| c.id).collect();

        session.reset();

        let after: Vec<u32> = session.cards().iter().map(|c| c.id).collect();
        assert_eq!(order, after);
    }

    #[test]
    fn test_shuffle_preserves_cards_and_flags() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut deck = cards(12);
        known(&mut deck, &[0, 5, 9]);
        let mut session = StudySession::new(deck.clone());
        session.advance();

        session.shuffle_with(&mut rng);

        assert_eq!(session.current_index(), 0);
        assert_eq!(ids(session.cards()), ids(&deck));
        for card in session.cards() {
            let original = deck.iter().find(|c| c.id == card.id).unwrap();
            assert_eq!(card, original);
        }
        assert!((session.progress() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shuffle_with_thread_rng() {
        let mut session = StudySession::new(cards(5));
        session.shuffle();
        assert_eq!(ids(session.cards()), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_session_tolerated() {
        let mut session = StudySession::new(Vec::new());

        session.advance();
        session.retreat();
        assert!(!session.mark_current_known());
        session.shuffle();
        session.reset();

        assert!(session.is_empty());
        assert!(session.current_card().is_none());
        assert!(session.progress().abs() < f64::EPSILON);
        assert!(!session.is_complete());
    }

    #[test]
    fn test_retreat_wraps() {
        let mut session = StudySession::new(cards(3));
        session.retreat();
        assert_eq!(session.current_index(), 2);
        session.retreat();
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_for_deck_copies_cards() {
        let deck = crate::deck::sample_decks(chrono::Utc::now()).remove(1);
        let mut session = StudySession::for_deck(&deck);
        session.mark_current_known();

        assert!(!deck.cards[0].known);
        assert_eq!(session.len(), 5);
    }
}
