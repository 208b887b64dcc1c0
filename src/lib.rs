use shadow_rs::shadow;

shadow!(build);

// Grid and its setup
// ------------------
pub mod config;
pub mod grid;
pub mod maze_gen;

// Search internals
// ----------------
pub mod path;
pub mod rank_heap;
pub mod search;

// Algorithms
// ----------
pub mod algorithms;

// Glue
// ----
pub mod logging;
pub mod render;
