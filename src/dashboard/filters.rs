//! Módulo de filtros y métricas derivadas para los grupos del reporte.
//!
//! Los filtros se aplican sobre la secuencia de grupos del reporte para
//! producir la vista filtrada que consume la capa de presentación. Todas
//! las funciones son totales: campos ausentes se tratan como ausentes,
//! nunca como error, y las divisiones inválidas se corrigen a 0.

use serde::{Deserialize, Serialize};

use crate::models::{Detail, Group};

/// Centinela para "sin filtro" en el filtro de departamento.
pub const DEPARTMENT_ALL: &str = "all";

/// Valor canónico de estado activo en los detalles (comparación
/// case-insensitive contra `Status`).
pub const STATUS_ACTIVE: &str = "ativo";

/// Filtro de estado del grupo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    /// Valor que debe aparecer (case-insensitive) en `Detail::status`
    /// para que el grupo pase el filtro. `All` no impone condición.
    fn wire_value(self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some("ativo"),
            StatusFilter::Inactive => Some("inativo"),
        }
    }
}

/// Filtro de desempeño sobre el porcentaje propio del grupo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceFilter {
    #[default]
    All,
    Zero,
    Low,
    Medium,
    High,
    Perfect,
}

/// Banda de clasificación de un porcentaje, usada para el estilo de la
/// barra de progreso y coherente con `PerformanceFilter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBucket {
    Zero,
    Low,
    Medium,
    High,
    Perfect,
}

/// Criterios de filtrado vigentes. Los tres campos son independientes y
/// por defecto no filtran nada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default = "default_department")]
    pub department: String,
    #[serde(default)]
    pub performance: PerformanceFilter,
}

fn default_department() -> String {
    DEPARTMENT_ALL.to_string()
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            status: StatusFilter::All,
            department: default_department(),
            performance: PerformanceFilter::All,
        }
    }
}

/// Clasifica un porcentaje en su banda de presentación.
/// Bordes: 0 y 100 son bandas propias; el resto son inclusivos en el
/// extremo superior. Valores fuera de [0,100] saturan en la banda más
/// cercana (Zero/Perfect), igual que el predicado del filtro.
pub fn classify_progress(percentage: f64) -> ProgressBucket {
    if percentage <= 0.0 {
        ProgressBucket::Zero
    } else if percentage <= 30.0 {
        ProgressBucket::Low
    } else if percentage <= 70.0 {
        ProgressBucket::Medium
    } else if percentage < 100.0 {
        ProgressBucket::High
    } else {
        ProgressBucket::Perfect
    }
}

/// Predicado del filtro de desempeño. Mismos bordes que
/// `classify_progress` para que la banda mostrada y la banda filtrada
/// nunca difieran.
fn matches_performance(filter: PerformanceFilter, percentage: f64) -> bool {
    match filter {
        PerformanceFilter::All => true,
        PerformanceFilter::Zero => percentage <= 0.0,
        PerformanceFilter::Low => percentage > 0.0 && percentage <= 30.0,
        PerformanceFilter::Medium => percentage > 30.0 && percentage <= 70.0,
        PerformanceFilter::High => percentage > 70.0 && percentage < 100.0,
        PerformanceFilter::Perfect => percentage >= 100.0,
    }
}

/// Recorre todos los detalles de un grupo (a través de sus indicadores).
fn details_of(group: &Group) -> impl Iterator<Item = &Detail> {
    group.indicators.iter().flat_map(|ind| ind.details.iter())
}

/// Filtro de estado: el grupo pasa si algún detalle tiene el estado
/// seleccionado (comparación case-insensitive).
fn matches_status(group: &Group, filter: StatusFilter) -> bool {
    match filter.wire_value() {
        None => true,
        Some(wanted) => details_of(group).any(|d| {
            d.status
                .as_deref()
                .map(|s| s.eq_ignore_ascii_case(wanted))
                .unwrap_or(false)
        }),
    }
}

/// Filtro de departamento: el grupo pasa si algún detalle pertenece al
/// departamento seleccionado (igualdad exacta, sensible a mayúsculas).
fn matches_department(group: &Group, department: &str) -> bool {
    if department == DEPARTMENT_ALL {
        return true;
    }
    details_of(group).any(|d| d.departamento.as_deref() == Some(department))
}

/// Evalúa los tres filtros sobre un grupo (AND lógico).
pub fn group_passes(group: &Group, criteria: &FilterCriteria) -> bool {
    matches_status(group, criteria.status)
        && matches_department(group, &criteria.department)
        && matches_performance(criteria.performance, group.percentage)
}

/// Aplica todos los filtros activos a la secuencia de grupos.
/// Preserva el orden del reporte; nunca reordena.
pub fn apply_all_filters(groups: &[Group], criteria: &FilterCriteria) -> Vec<Group> {
    groups
        .iter()
        .filter(|g| group_passes(g, criteria))
        .cloned()
        .collect()
}

/// Estado efectivo del grupo: "ativo" si al menos un detalle tiene
/// `Status` igual (case-insensitive) a "Ativo"; si no, "inativo".
/// Propiedad derivada, no almacenada.
pub fn group_status(group: &Group) -> &'static str {
    let active = details_of(group).any(|d| {
        d.status
            .as_deref()
            .map(|s| s.eq_ignore_ascii_case(STATUS_ACTIVE))
            .unwrap_or(false)
    });
    if active { "ativo" } else { "inativo" }
}

/// Departamento principal del grupo: literalmente el primer valor no
/// vacío encontrado en orden original (no el más frecuente). "N/A" si
/// ningún detalle trae departamento.
pub fn primary_department(group: &Group) -> String {
    details_of(group)
        .filter_map(|d| d.departamento.as_deref())
        .find(|dep| !dep.is_empty())
        .map(|dep| dep.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Porcentaje derivado de un detalle: atingida/máxima*100. Divisiones
/// inválidas (denominador 0 o campo ausente) se corrigen a 0; nunca se
/// expone NaN/Infinity.
pub fn detail_percentage(detail: &Detail) -> f64 {
    match (detail.pontuacao_atingida, detail.pontuacao_maxima) {
        (Some(atingida), Some(maxima)) => {
            let pct = atingida / maxima * 100.0;
            if pct.is_finite() { pct } else { 0.0 }
        }
        _ => 0.0,
    }
}

/// Enumera los departamentos presentes en el reporte: valores no vacíos
/// de `Departamento` en cualquier detalle, sin duplicados, orden
/// ascendente, con el centinela "all" al frente. Se recalcula en cada
/// carga de reporte (es una propiedad del reporte, no del filtro).
pub fn list_departments(groups: &[Group]) -> Vec<String> {
    let mut set: std::collections::BTreeSet<String> = std::collections::BTreeSet::new();
    for group in groups {
        for detail in details_of(group) {
            if let Some(dep) = detail.departamento.as_deref() {
                if !dep.is_empty() {
                    set.insert(dep.to_string());
                }
            }
        }
    }
    let mut out = Vec::with_capacity(set.len() + 1);
    out.push(DEPARTMENT_ALL.to_string());
    out.extend(set);
    out
}
