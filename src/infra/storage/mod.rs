pub mod cloudinary_storage;
pub mod local_storage;
