// Estructuras de datos principales del reporte de desempeño.
//
// Los nombres de los campos en el JSON vienen fijados por la planilla de
// origen (en portugués): `total_atingida`, `Departamento`, `Pontuação
// Atingida`, etc. Aquí se mapean con `serde(rename)` a nombres Rust.

use serde::{Deserialize, Serialize};

/// Rango general del reporte según la pontuación total alcanzada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallRank {
    Bluebelt,
    Premium,
    Advanced,
    Standard,
}

/// Documento de nivel superior: resumen general + grupos de indicadores.
/// Se reemplaza completo en cada carga; nunca se muta parcialmente.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub overall_score: f64,
    pub overall_max_score: f64,
    pub overall_percentage: f64,
    pub overall_rank: OverallRank,
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// Grupo nombrado de indicadores con pontuación agregada.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub total_atingida: f64,
    pub total_maxima: f64,
    /// Si el JSON no lo trae, se trata como 0.
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub indicators: Vec<Indicator>,
}

/// Indicador medido dentro de un grupo; agrega sus registros de detalle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicator {
    pub name: String,
    pub total_atingida: f64,
    pub total_maxima: f64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub details: Vec<Detail>,
}

/// Registro de grano más fino (una fila de la planilla). Todos los campos
/// son opcionales: si faltan se tratan como ausentes, nunca como error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Detail {
    #[serde(rename = "Grupo", default)]
    pub grupo: Option<String>,
    #[serde(rename = "Sub-Grupo", default)]
    pub sub_grupo: Option<String>,
    #[serde(rename = "Departamento", default)]
    pub departamento: Option<String>,
    #[serde(rename = "Sub-Categoria", default)]
    pub sub_categoria: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
    #[serde(rename = "Pontuação Atingida", default)]
    pub pontuacao_atingida: Option<f64>,
    #[serde(rename = "Pontuação Máxima", default)]
    pub pontuacao_maxima: Option<f64>,
}

/// Fila plana del origen de datos crudo (`data.json`), previa a la
/// agregación en grupos/indicadores. Ver `report::process_records`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Grupo", default)]
    pub grupo: Option<String>,
    #[serde(rename = "Indicador", default)]
    pub indicador: Option<String>,
    #[serde(rename = "Sub_Grupo", default)]
    pub sub_grupo: Option<String>,
    #[serde(rename = "Departamento", default)]
    pub departamento: Option<String>,
    #[serde(rename = "Sub_Categoria", default)]
    pub sub_categoria: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
    #[serde(rename = "Pontuação_Atingida", default)]
    pub pontuacao_atingida: Option<f64>,
    #[serde(rename = "Pontuação_Máxima", default)]
    pub pontuacao_maxima: Option<f64>,
}
