use serde::{Deserialize, Serialize};

/// One administrative procedure ("trámite") as returned by the portal backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tramite {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub asunto: String,
    #[serde(default)]
    pub nombre_estado: String,
    #[serde(default)]
    pub codigo_estado: String,
    #[serde(default)]
    pub nombre_url: String,
    #[serde(default)]
    pub id_tipo_tramite: Option<i64>,
}

/// A trámite that matched the summer-course keyword list.
#[derive(Debug, Clone, Serialize)]
pub struct TramiteMatch {
    pub nombre: String,
    pub descripcion: String,
    pub estado: String,
    pub codigo_estado: String,
    pub disponible: bool,
    pub nombre_url: String,
    pub id_tipo_tramite: Option<i64>,
}
