pub mod adventure;
pub mod countdown;
pub mod looping_square;
pub mod proximity_flash;

pub use adventure::Adventure;
pub use countdown::Countdown;
pub use looping_square::LoopingSquare;
pub use proximity_flash::ProximityFlash;
