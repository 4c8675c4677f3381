//! Shared fixtures for webmind integration tests
//!
//! A small bilingual corpus of note texts and a seeded generator that
//! assembles random note batches from it.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use webmind::Note;

/// Sample note texts spanning every category plus some uncategorizable ones.
pub const CORPUS: &[&str] = &[
    "Atoms bond into molecules during a chemical reaction.",
    "The periodic table orders each element by atomic number.",
    "DNA encodes every gene; cells read it to build protein.",
    "Light behaves as a wave and carries energy.",
    "Solving a quadratic equation with algebra and geometry.",
    "The ancient dynasty fell after a long war.",
    "A novel by a famous author, read alongside an essay.",
    "Writing Python code: a sorting algorithm in one function.",
    "Deploying the web server behind an API gateway and a database.",
    "Marketing and finance shape the management of a business.",
    "Oil painting and music inspire good design.",
    "化学反应中的分子与原子",
    "生物细胞中的基因与蛋白质",
    "编程时使用函数实现算法",
    "Zebras graze quietly near the river bend.",
    "Quarterly gardening checklist: mulch, prune, water.",
    "<p>Rust <b>ownership</b> makes code safe.</p>",
    "",
];

/// Seeded generator so failures reproduce.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `count` notes with unique ids and texts drawn from [`CORPUS`]. Roughly
/// a third carry a summary instead of relying on content.
pub fn random_notes(rng: &mut StdRng, count: usize) -> Vec<Note> {
    (0..count)
        .map(|i| {
            let content = CORPUS.choose(rng).copied().unwrap_or_default();
            let note = Note::with_id(format!("n{i}"), content);
            if rng.gen_ratio(1, 3) {
                let summary = CORPUS.choose(rng).copied().unwrap_or_default();
                note.with_summary(summary)
            } else {
                note
            }
        })
        .collect()
}

/// Note with a fixed id and content.
pub fn note(id: &str, content: &str) -> Note {
    Note::with_id(id, content)
}
