pub mod pixel_buffer;
