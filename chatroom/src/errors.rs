pub mod gateway_error;
pub mod receive_frame_error;
pub mod server_error;
