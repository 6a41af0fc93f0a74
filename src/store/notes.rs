use super::action::NotesAction;
use crate::models::{Category, Note, seed_notes};

/// 笔记列表，最新的在最前
#[derive(Debug, Clone, PartialEq)]
pub struct NotesState {
    pub notes: Vec<Note>,
}

impl NotesState {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn count(&self, category: Category) -> usize {
        self.notes.iter().filter(|n| n.category == category).count()
    }
}

impl Default for NotesState {
    fn default() -> Self {
        Self::new(seed_notes())
    }
}

pub fn reduce(state: &NotesState, action: &NotesAction) -> NotesState {
    match action {
        NotesAction::AddNote(note) => {
            let mut notes = Vec::with_capacity(state.notes.len() + 1);
            notes.push(note.clone());
            notes.extend(state.notes.iter().cloned());
            NotesState { notes }
        }
        NotesAction::UpdateNote(note) => {
            let mut next = state.clone();
            if let Some(slot) = next.notes.iter_mut().find(|n| n.id == note.id) {
                *slot = note.clone();
            }
            next
        }
        NotesAction::DeleteNote(id) => NotesState {
            notes: state
                .notes
                .iter()
                .filter(|n| &n.id != id)
                .cloned()
                .collect(),
        },
    }
}

/// 按分类与搜索词过滤（大小写不敏感），保持列表顺序
pub fn filter_notes<'a>(notes: &'a [Note], category: Category, search: &str) -> Vec<&'a Note> {
    let needle = search.to_lowercase();
    notes
        .iter()
        .filter(|n| n.category == category)
        .filter(|n| needle.is_empty() || n.matches(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, category: Category) -> Note {
        Note {
            id: id.to_string(),
            question: "Q".to_string(),
            answer: "A".to_string(),
            category,
            code: None,
            created_at: "t".to_string(),
        }
    }

    #[test]
    fn test_add_prepends() {
        let mut state = NotesState::default();
        for i in 0..3 {
            let before = state.notes.len();
            let id = format!("new-{i}");
            state = reduce(&state, &NotesAction::AddNote(note(&id, Category::Nodejs)));
            assert_eq!(state.notes.len(), before + 1);
            assert_eq!(state.notes[0].id, id);
        }
    }

    #[test]
    fn test_update_missing_is_identity() {
        let state = NotesState::default();
        let next = reduce(&state, &NotesAction::UpdateNote(note("404", Category::React)));
        assert_eq!(next, state);
    }

    #[test]
    fn test_update_keeps_position() {
        let state = NotesState::default();
        let mut edited = state.notes[2].clone();
        edited.answer = "Edited".to_string();

        let next = reduce(&state, &NotesAction::UpdateNote(edited.clone()));
        assert_eq!(next.notes.len(), state.notes.len());
        assert_eq!(next.notes[2], edited);

        let visible = filter_notes(&next.notes, edited.category, "");
        assert!(visible.iter().any(|n| n.id == edited.id && n.answer == "Edited"));
    }

    #[test]
    fn test_update_keeps_code_on_other_category() {
        let state = NotesState::default();
        let mut edited = state.notes[0].clone();
        edited.code = Some("stray".to_string());

        let next = reduce(&state, &NotesAction::UpdateNote(edited));
        assert_eq!(next.notes[0].code.as_deref(), Some("stray"));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let state = NotesState::default();
        let once = reduce(&state, &NotesAction::DeleteNote("3".to_string()));
        let twice = reduce(&once, &NotesAction::DeleteNote("3".to_string()));
        assert_eq!(once.notes.len(), 5);
        assert!(once.get("3").is_none());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let state = NotesState::default();
        assert_eq!(reduce(&state, &NotesAction::DeleteNote("x".to_string())), state);
    }

    #[test]
    fn test_filter_search_fields() {
        let state = NotesState::default();

        let hits = filter_notes(&state.notes, Category::React, "HOOKS");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");

        // 答案内容
        let hits = filter_notes(&state.notes, Category::Nodejs, "v8");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "3");

        // 代码内容
        let hits = filter_notes(&state.notes, Category::Code, "createcontext");
        assert_eq!(hits.len(), 1);

        assert!(filter_notes(&state.notes, Category::Mobileapp, "angular").is_empty());
    }

    #[test]
    fn test_filter_is_pure() {
        let state = NotesState::default();
        let snapshot = state.clone();
        let first = filter_notes(&state.notes, Category::React, "react");
        let second = filter_notes(&state.notes, Category::React, "react");
        assert_eq!(first, second);
        assert_eq!(state, snapshot);
    }
}
