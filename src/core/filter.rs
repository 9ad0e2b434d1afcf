use crate::domain::model::{Tramite, TramiteMatch};

/// Spanish-language variants of "summer course" searched in each trámite.
pub const KEYWORDS: [&str; 6] = [
    "verano",
    "curso verano",
    "curso de verano",
    "matricula verano",
    "matrícula verano",
    "ciclo verano",
];

/// Returns the trámites whose name, description or subject contains one of
/// the summer-course keywords, preserving API order. A trámite appears at
/// most once; `disponible` is only computed for matched entries.
pub fn find_verano(tramites: &[Tramite]) -> Vec<TramiteMatch> {
    let mut encontrados = Vec::new();

    for tramite in tramites {
        let texto = format!(
            "{} {} {}",
            tramite.nombre.to_lowercase(),
            tramite.descripcion.to_lowercase(),
            tramite.asunto.to_lowercase()
        );

        if KEYWORDS.iter().any(|keyword| texto.contains(keyword)) {
            encontrados.push(TramiteMatch {
                nombre: tramite.nombre.clone(),
                descripcion: tramite.descripcion.clone(),
                estado: tramite.nombre_estado.clone(),
                codigo_estado: tramite.codigo_estado.clone(),
                disponible: tramite.codigo_estado == "1",
                nombre_url: tramite.nombre_url.clone(),
                id_tipo_tramite: tramite.id_tipo_tramite,
            });
        }
    }

    encontrados
}
