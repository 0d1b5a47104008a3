//! Estado del panel: reporte cargado, criterios vigentes y vista filtrada.
//!
//! Reemplaza al singleton implícito del cliente original por una
//! estructura explícita con dueño claro: el servidor la posee y cada
//! operación (`load`, `apply_filters`, `clear_filters`) es una reacción
//! discreta a un disparador externo. Ninguna operación falla por falta
//! de reporte; sin reporte todas producen salida vacía.

pub mod filters;

use crate::models::{Group, Report};
use filters::{FilterCriteria, apply_all_filters, list_departments};

/// Estado compuesto del panel. La vista filtrada es derivada: se
/// reemplaza completa en cada cambio de criterios, nunca se muta en sitio.
#[derive(Debug, Default)]
pub struct DashboardState {
    report: Option<Report>,
    criteria: FilterCriteria,
    filtered: Vec<Group>,
    departments: Vec<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        DashboardState::default()
    }

    /// Reemplaza el reporte completo. Resetea los criterios a "all",
    /// restaura la vista a la secuencia completa de grupos y recalcula
    /// el conjunto de departamentos (propiedad del reporte, no del filtro).
    pub fn load(&mut self, report: Report) {
        self.departments = list_departments(&report.groups);
        self.filtered = report.groups.clone();
        self.criteria = FilterCriteria::default();
        self.report = Some(report);
    }

    /// `None` antes de la primera carga exitosa.
    pub fn current_report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Vista filtrada vigente; vacía antes de la primera carga.
    pub fn current_view(&self) -> &[Group] {
        &self.filtered
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Opciones válidas para el filtro de departamento ("all" primero).
    /// Vacío antes de la primera carga.
    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    /// Aplica criterios nuevos y recalcula la vista completa. Sin
    /// reporte cargado es un no-op seguro que deja la vista vacía.
    pub fn apply_filters(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.filtered = match &self.report {
            Some(report) => apply_all_filters(&report.groups, &self.criteria),
            None => Vec::new(),
        };
    }

    /// Operación explícita de limpieza: los tres criterios vuelven a
    /// "all" y la vista se restaura a la secuencia completa. Idempotente
    /// y equivalente a `apply_filters(FilterCriteria::default())`.
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.filtered = match &self.report {
            Some(report) => report.groups.clone(),
            None => Vec::new(),
        };
    }

    /// Detalle completo (indicadores y detalles) de un grupo por nombre,
    /// para la vista modal. Busca en el reporte completo, no en la vista
    /// filtrada.
    pub fn group_detail(&self, name: &str) -> Option<&Group> {
        self.report.as_ref()?.groups.iter().find(|g| g.name == name)
    }
}
