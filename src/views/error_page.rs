/// Error page; `message` is shown verbatim.
pub fn render_error_page(message: &str) -> String {
    format!("Erreur\n{}\n", message)
}

pub fn render_loading_page() -> String {
    "Loading...\n".to_string()
}
