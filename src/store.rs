//! In-memory list stores for fetched resources.
//!
//! These are pure view caches: created empty, replaced wholesale on each
//! successful fetch, never merged or diffed. If two fetches for the same
//! list race, the last one to land wins.

use crate::models::{AnimeSeason, Chapter, Character, Episode, Volume};

/// Cache of novel volumes and chapters, plus the current selection.
#[derive(Debug, Default)]
pub struct NovelStore {
    pub volumes: Vec<Volume>,
    pub current_volume: Option<Volume>,
    pub chapters: Vec<Chapter>,
    pub current_chapter: Option<Chapter>,
}

impl NovelStore {
    pub fn set_volumes(&mut self, volumes: Vec<Volume>) {
        self.volumes = volumes;
    }

    pub fn set_current_volume(&mut self, volume: Volume) {
        self.current_volume = Some(volume);
    }

    pub fn set_chapters(&mut self, chapters: Vec<Chapter>) {
        self.chapters = chapters;
    }

    pub fn set_current_chapter(&mut self, chapter: Chapter) {
        self.current_chapter = Some(chapter);
    }
}

/// Cache of wiki characters, plus the current selection.
#[derive(Debug, Default)]
pub struct WikiStore {
    pub characters: Vec<Character>,
    pub current_character: Option<Character>,
}

impl WikiStore {
    pub fn set_characters(&mut self, characters: Vec<Character>) {
        self.characters = characters;
    }

    pub fn set_current_character(&mut self, character: Character) {
        self.current_character = Some(character);
    }
}

/// Cache of anime seasons and episodes, plus the current selection.
#[derive(Debug, Default)]
pub struct AnimeStore {
    pub seasons: Vec<AnimeSeason>,
    pub episodes: Vec<Episode>,
    pub current_episode: Option<Episode>,
}

impl AnimeStore {
    pub fn set_seasons(&mut self, seasons: Vec<AnimeSeason>) {
        self.seasons = seasons;
    }

    pub fn set_episodes(&mut self, episodes: Vec<Episode>) {
        self.episodes = episodes;
    }

    pub fn set_current_episode(&mut self, episode: Episode) {
        self.current_episode = Some(episode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(id: u64) -> Volume {
        Volume {
            id,
            number: id as u32,
            title: format!("Volume {id}"),
            description: String::new(),
            cover: None,
        }
    }

    #[test]
    fn test_lists_replaced_wholesale() {
        let mut store = NovelStore::default();
        store.set_volumes(vec![volume(1), volume(2)]);
        assert_eq!(store.volumes.len(), 2);

        // A later fetch overwrites, never merges
        store.set_volumes(vec![volume(3)]);
        assert_eq!(store.volumes.len(), 1);
        assert_eq!(store.volumes[0].id, 3);
    }

    #[test]
    fn test_current_selection_replaced() {
        let mut store = NovelStore::default();
        assert!(store.current_volume.is_none());

        store.set_current_volume(volume(1));
        store.set_current_volume(volume(2));
        assert_eq!(store.current_volume.as_ref().unwrap().id, 2);
    }
}
