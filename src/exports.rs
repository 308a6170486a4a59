pub use {anyhow, indexmap, itertools, log, rayon, serde, serde_json};
