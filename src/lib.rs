// neomap - Controller button remapper for DotEmu's Neo Geo games
//
// This library patches the button jump table of known Windows builds and
// reports which known tables an executable contains.

pub mod error;
pub mod inspector;
pub mod logging;
pub mod patcher;
pub mod signatures;
pub mod types;

pub use error::{NeomapError, Result};
pub use inspector::{Inspector, OutputFormat};
pub use patcher::{PatchOutcome, Patcher};
pub use types::{validate_buttons, ButtonLetter, ButtonMapping};
