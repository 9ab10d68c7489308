pub mod aspect_service;
pub mod chart_service;
pub mod house_service;
pub mod layout_service;
pub mod output_service;
pub mod position_service;
pub mod time_service;
