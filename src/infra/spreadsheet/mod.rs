pub mod xlsx_renderer;
