pub mod core;
pub mod frame;
pub mod layout;
pub mod loading;
pub mod motion;
pub mod particles;
pub mod reveal;
pub mod scene;
pub mod scroll;
pub mod systems;
