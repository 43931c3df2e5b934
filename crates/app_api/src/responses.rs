use serde::Serialize;

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct WorkbookResponse {
    pub workbook: String,
    pub workbook_dir: String,
    pub app_data_dir: String,
}
