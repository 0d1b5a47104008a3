use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use futures_util::stream::StreamExt;
use serde_json::json;
use std::sync::RwLock;

use crate::dashboard::DashboardState;
use crate::dashboard::filters::{
    FilterCriteria, classify_progress, detail_percentage, group_status, primary_department,
};
use crate::models::Group;
use crate::report::{get_data_dir, load_report};

type SharedState = web::Data<RwLock<DashboardState>>;

/// Valida la extensión de un archivo subido: sólo se aceptan planillas
/// Excel (.xlsx/.xls), sin distinguir mayúsculas.
pub fn is_excel_filename(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".xlsx") || lower.ends_with(".xls")
}

/// Proyección de un grupo a "tarjeta" para la grilla: campos propios más
/// las métricas derivadas (banda, estado, departamento principal).
fn group_card(group: &Group) -> serde_json::Value {
    json!({
        "name": group.name,
        "total_atingida": group.total_atingida,
        "total_maxima": group.total_maxima,
        "percentage": group.percentage,
        "bucket": classify_progress(group.percentage),
        "status": group_status(group),
        "department": primary_department(group),
        "indicators_count": group.indicators.len(),
    })
}

fn view_response(dash: &DashboardState) -> HttpResponse {
    let cards: Vec<serde_json::Value> = dash.current_view().iter().map(group_card).collect();
    HttpResponse::Ok().json(json!({
        "count": cards.len(),
        "criteria": dash.criteria(),
        "groups": cards,
    }))
}

/// GET /report
/// Resumen general para la cabecera de ranking.
async fn report_handler(state: SharedState) -> impl Responder {
    let dash = match state.read() {
        Ok(d) => d,
        Err(_) => return HttpResponse::InternalServerError().json(json!({"error": "estado del panel no disponible"})),
    };
    match dash.current_report() {
        Some(report) => HttpResponse::Ok().json(json!({
            "overall_score": report.overall_score,
            "overall_max_score": report.overall_max_score,
            "overall_percentage": report.overall_percentage,
            "overall_rank": report.overall_rank,
            "groups_count": report.groups.len(),
        })),
        None => HttpResponse::NotFound().json(json!({"error": "no hay reporte cargado"})),
    }
}

/// GET /groups
/// Vista filtrada vigente como tarjetas de grupo.
async fn groups_handler(state: SharedState) -> impl Responder {
    match state.read() {
        Ok(dash) => view_response(&dash),
        Err(_) => HttpResponse::InternalServerError().json(json!({"error": "estado del panel no disponible"})),
    }
}

/// GET /groups/{name}
/// Detalle completo de un grupo (indicadores y detalles) para la vista
/// modal. Busca en el reporte completo, no en la vista filtrada.
async fn group_detail_handler(path: web::Path<String>, state: SharedState) -> impl Responder {
    let name = path.into_inner();
    let dash = match state.read() {
        Ok(d) => d,
        Err(_) => return HttpResponse::InternalServerError().json(json!({"error": "estado del panel no disponible"})),
    };

    let group = match dash.group_detail(&name) {
        Some(g) => g,
        None => return HttpResponse::NotFound().json(json!({"error": format!("grupo no encontrado: {}", name)})),
    };

    let indicators: Vec<serde_json::Value> = group
        .indicators
        .iter()
        .map(|ind| {
            let details: Vec<serde_json::Value> = ind
                .details
                .iter()
                .map(|d| {
                    json!({
                        "sub_grupo": d.sub_grupo.clone().unwrap_or_else(|| "N/A".to_string()),
                        "departamento": d.departamento.clone().unwrap_or_else(|| "N/A".to_string()),
                        "sub_categoria": d.sub_categoria.clone().unwrap_or_else(|| "N/A".to_string()),
                        "status": d.status.clone().unwrap_or_else(|| "N/A".to_string()),
                        "pontuacao_atingida": d.pontuacao_atingida.unwrap_or(0.0),
                        "pontuacao_maxima": d.pontuacao_maxima.unwrap_or(0.0),
                        "percentual_penetracao": detail_percentage(d),
                    })
                })
                .collect();
            json!({
                "name": ind.name,
                "total_atingida": ind.total_atingida,
                "total_maxima": ind.total_maxima,
                "percentage": ind.percentage,
                "details": details,
            })
        })
        .collect();

    HttpResponse::Ok().json(json!({
        "name": group.name,
        "total_atingida": group.total_atingida,
        "total_maxima": group.total_maxima,
        "percentage": group.percentage,
        "bucket": classify_progress(group.percentage),
        "status": group_status(group),
        "department": primary_department(group),
        "indicators_count": group.indicators.len(),
        "indicators": indicators,
    }))
}

/// GET /departments
/// Opciones válidas del filtro de departamento ("all" primero).
async fn departments_handler(state: SharedState) -> impl Responder {
    match state.read() {
        Ok(dash) => HttpResponse::Ok().json(json!({"departments": dash.departments()})),
        Err(_) => HttpResponse::InternalServerError().json(json!({"error": "estado del panel no disponible"})),
    }
}

/// POST /filters
/// Aplica criterios nuevos (campos ausentes quedan en "all") y devuelve
/// la vista recalculada.
async fn filters_apply_handler(body: web::Json<serde_json::Value>, state: SharedState) -> impl Responder {
    let criteria: FilterCriteria = match serde_json::from_value(body.into_inner()) {
        Ok(c) => c,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("criterios inválidos: {}", e)})),
    };

    match state.write() {
        Ok(mut dash) => {
            dash.apply_filters(criteria);
            view_response(&dash)
        }
        Err(_) => HttpResponse::InternalServerError().json(json!({"error": "estado del panel no disponible"})),
    }
}

/// POST /filters/clear
/// Limpieza explícita: los tres criterios vuelven a "all".
async fn filters_clear_handler(state: SharedState) -> impl Responder {
    match state.write() {
        Ok(mut dash) => {
            dash.clear_filters();
            view_response(&dash)
        }
        Err(_) => HttpResponse::InternalServerError().json(json!({"error": "estado del panel no disponible"})),
    }
}

/// POST /refresh
/// Recarga el reporte desde el directorio de datos. Si la carga falla,
/// el reporte anterior queda intacto y se devuelve la notificación de
/// error (nunca un fallo no manejado).
async fn refresh_handler(state: SharedState) -> impl Responder {
    let dir = get_data_dir();
    match load_report(&dir).await {
        Ok(report) => {
            let groups_count = report.groups.len();
            match state.write() {
                Ok(mut dash) => {
                    dash.load(report);
                    println!("✅ Reporte recargado: {} grupos", groups_count);
                    HttpResponse::Ok().json(json!({
                        "status": "ok",
                        "message": "Dados atualizados com sucesso!",
                        "groups_count": groups_count,
                    }))
                }
                Err(_) => HttpResponse::InternalServerError().json(json!({"error": "estado del panel no disponible"})),
            }
        }
        Err(e) => {
            eprintln!("❌ Error al recargar el reporte desde {:?}: {}", dir, e);
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": format!("Erro ao carregar dados: {}", e),
            }))
        }
    }
}

/// POST /upload
/// Acepta un Excel por multipart, valida la extensión (.xlsx/.xls) y
/// descarta el contenido: el procesamiento real queda fuera de alcance,
/// sólo se recarga el origen JSON existente (simulado).
async fn upload_handler(mut payload: Multipart, state: SharedState) -> impl Responder {
    let mut accepted: Option<String> = None;

    while let Some(field_res) = payload.next().await {
        match field_res {
            Ok(mut field) => {
                let filename = field
                    .content_disposition()
                    .get_filename()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("upload-{}.dat", chrono::Utc::now().timestamp_millis()));

                if !is_excel_filename(&filename) {
                    // rechazo antes de procesar nada; sin cambio de estado
                    return HttpResponse::BadRequest().json(json!({
                        "status": "error",
                        "message": "Por favor, selecione um arquivo Excel (.xlsx ou .xls)",
                    }));
                }

                // drenar el contenido sin guardarlo
                while let Some(chunk) = field.next().await {
                    if let Err(e) = chunk {
                        eprintln!("upload stream error: {}", e);
                        break;
                    }
                }
                accepted = Some(filename);
            }
            Err(e) => {
                eprintln!("multipart field error: {}", e);
            }
        }
    }

    let filename = match accepted {
        Some(f) => f,
        None => return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Nenhum arquivo recebido",
        })),
    };

    // misma recarga que /refresh: el "procesamiento" del archivo es simulado
    let dir = get_data_dir();
    match load_report(&dir).await {
        Ok(report) => match state.write() {
            Ok(mut dash) => {
                dash.load(report);
                HttpResponse::Ok().json(json!({
                    "status": "ok",
                    "message": "Arquivo processado com sucesso! (Simulado)",
                    "file": filename,
                }))
            }
            Err(_) => HttpResponse::InternalServerError().json(json!({"error": "estado del panel no disponible"})),
        },
        Err(e) => {
            eprintln!("❌ Error al recargar tras upload: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": format!("Erro ao processar arquivo: {}", e),
            }))
        }
    }
}

/// GET /help
/// Describe la API y muestra un ejemplo de criterios de filtrado.
async fn help_handler() -> impl Responder {
    let example = FilterCriteria {
        status: crate::dashboard::filters::StatusFilter::Active,
        department: "Comercial".to_string(),
        performance: crate::dashboard::filters::PerformanceFilter::Medium,
    };

    let help = json!({
        "description": "API del panel de desempeño. El reporte se carga desde el directorio de datos (DASH_DATA_DIR o ./data) y se expone como resumen de ranking, grilla de grupos filtrable y detalle por grupo.",
        "endpoints": {
            "GET /report": "resumen general (score, porcentaje, rank)",
            "GET /groups": "vista filtrada vigente (tarjetas de grupo)",
            "GET /groups/{name}": "detalle completo de un grupo",
            "GET /departments": "departamentos disponibles ('all' primero)",
            "POST /filters": "aplica criterios; campos ausentes quedan en 'all'",
            "POST /filters/clear": "limpia los tres filtros",
            "POST /refresh": "recarga el reporte desde disco",
            "POST /upload": "multipart .xlsx/.xls; procesamiento simulado",
        },
        "filters_example": example,
        "performance_buckets": ["all", "zero", "low", "medium", "high", "perfect"],
        "status_values": ["all", "active", "inactive"],
    });

    HttpResponse::Ok().json(help)
}

pub async fn run_server(bind_addr: &str) -> std::io::Result<()> {
    let state: SharedState = web::Data::new(RwLock::new(DashboardState::new()));

    // Carga inicial: si falla, el servidor arranca con estado vacío y los
    // endpoints dependientes responden vacío/404 sin romperse.
    let dir = get_data_dir();
    match load_report(&dir).await {
        Ok(report) => {
            println!("✅ Reporte inicial cargado: {} grupos", report.groups.len());
            if let Ok(mut dash) = state.write() {
                dash.load(report);
            }
        }
        Err(e) => eprintln!("⚠️  No se pudo cargar el reporte inicial desde {:?}: {}", dir, e),
    }

    let app_state = state.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Cors::permissive())
            .route("/report", web::get().to(report_handler))
            .route("/groups", web::get().to(groups_handler))
            .route("/groups/{name}", web::get().to(group_detail_handler))
            .route("/departments", web::get().to(departments_handler))
            .route("/filters", web::post().to(filters_apply_handler))
            .route("/filters/clear", web::post().to(filters_clear_handler))
            .route("/refresh", web::post().to(refresh_handler))
            .route("/upload", web::post().to(upload_handler))
            .route("/help", web::get().to(help_handler))
    })
    .bind(bind_addr)?
    .run()
    .await
}
