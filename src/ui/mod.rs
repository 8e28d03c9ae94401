pub mod customize_scene;
pub mod game_common;
pub mod game_scene;
pub mod pixel_buf;
pub mod sprite;
