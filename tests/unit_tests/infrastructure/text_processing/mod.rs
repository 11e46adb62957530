mod composite_file_loader_test;
mod text_sanitizer_test;
