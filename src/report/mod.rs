//! Carga del reporte de desempeño desde el directorio de datos.
//!
//! El origen preferido es `processed_data.json` (reporte ya agregado).
//! Si no existe, se cae a `data.json` (filas crudas de la planilla) y se
//! agrega en memoria con `process_records`. El parseo real de Excel queda
//! fuera de alcance: sólo se consume la etapa JSON.

mod process;

pub use process::{calculate_rank, process_records};

use std::path::{Path, PathBuf};

use crate::models::{RawRecord, Report};

/// Reporte ya procesado (salida de la etapa de agregación).
pub const PROCESSED_FILE: &str = "processed_data.json";

/// Filas crudas exportadas de la planilla.
pub const RAW_FILE: &str = "data.json";

/// Resuelve el directorio de datos.
/// Orden: variable de entorno `DASH_DATA_DIR`, luego `data/` relativo al
/// directorio de trabajo, luego `data/` a secas como último recurso.
pub fn get_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("DASH_DATA_DIR") {
        let p = PathBuf::from(path);
        if p.exists() {
            return p;
        }
        eprintln!("⚠️  DASH_DATA_DIR apunta a un directorio inexistente: {:?}", p);
    }

    if let Ok(cwd) = std::env::current_dir() {
        let candidate = cwd.join("data");
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from("data")
}

/// Lee y parsea el reporte desde `dir`. Única frontera asíncrona del
/// sistema: el resultado sólo se aplica al estado si la carga completa
/// tuvo éxito, de modo que un fallo deja intacto el reporte anterior.
pub async fn load_report(dir: &Path) -> Result<Report, Box<dyn std::error::Error>> {
    let processed_path = dir.join(PROCESSED_FILE);
    if processed_path.exists() {
        let contents = tokio::fs::read_to_string(&processed_path)
            .await
            .map_err(|e| format!("no se pudo leer {}: {}", processed_path.display(), e))?;
        let report: Report = serde_json::from_str(&contents)
            .map_err(|e| format!("JSON inválido en {}: {}", processed_path.display(), e))?;
        return Ok(report);
    }

    // fallback: agregar las filas crudas
    let raw_path = dir.join(RAW_FILE);
    let contents = tokio::fs::read_to_string(&raw_path)
        .await
        .map_err(|e| format!("no se pudo leer {}: {}", raw_path.display(), e))?;
    let records: Vec<RawRecord> = serde_json::from_str(&contents)
        .map_err(|e| format!("JSON inválido en {}: {}", raw_path.display(), e))?;
    Ok(process_records(records))
}
