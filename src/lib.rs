//! Pack and unpack the ART picture archives of the Imagination Pilots games.
//!
//! Two archive families exist. The 16-bit titles (Blown Away, Panic in the Park, Where's
//! Waldo? At the Circus) store 8-bit pictures with an optional palette, see [ipe16]. The
//! 32-bit titles (Where's Waldo? Exploring Geography, Eraser Turnabout, Virtual K'Nex) store
//! chunked bitmap files, see [ipe32].
//!
//! An unpacked archive is a folder of bitmaps with an `index.txt` descriptor listing them in
//! archive order. [pack::pack] turns such a folder back into an archive.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ipe_art::{game::Game, pack::pack, unpack::unpack};
//!
//! fn main() -> Result<(), ipe_art::error::ArtError> {
//!     let report = unpack(Path::new("WALDO.ART"), Some(Path::new("waldo")))?;
//!     assert!(report.is_success());
//!
//!     pack(Game::Waldo, Path::new("waldo"), Path::new("WALDO.ART"))?;
//!     Ok(())
//! }
//! ```

pub mod bitmap;
pub mod descriptor;
pub mod error;
pub mod game;
pub mod ipe16;
pub mod ipe32;
pub mod names;
pub mod pack;
pub mod palette;
pub mod unpack;
