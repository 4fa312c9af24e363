use askama::Template;

/// Display-region table. Cells arrive already formatted.
#[derive(Template)]
#[template(path = "data_table.html")]
pub struct DataTableTemplate {
    pub header: Vec<String>,
    pub body: Vec<Vec<String>>,
}
