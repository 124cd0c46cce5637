pub mod button;
pub mod image;
pub mod signature;

pub use button::{validate_buttons, ButtonLetter, ButtonMapping, NEOGEO_BUTTONS};
pub use image::ExecutableImage;
pub use signature::{JumpTable, Signature, SignatureSlot};
