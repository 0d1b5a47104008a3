// --- Painel de Desempenho - Archivo principal ---

use rankboard::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    println!("=== Painel de Desempenho (API) ===");
    let bind = std::env::var("DASH_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    println!("Iniciando servidor en http://{}", bind);
    println!();
    println!("Endpoints disponibles:");
    println!("  GET  /report          - Resumen general (score, porcentaje, rank)");
    println!("  GET  /groups          - Vista filtrada de grupos (tarjetas)");
    println!("  GET  /groups/{{name}}   - Detalle completo de un grupo");
    println!("  GET  /departments     - Departamentos disponibles para filtrar");
    println!("  POST /filters         - Body JSON. Ejemplo:");
    println!("{}", r#"{
    "status": "active",
    "department": "Comercial",
    "performance": "medium"
}"#);
    println!("  POST /filters/clear   - Limpia los tres filtros (vuelven a 'all')");
    println!("  POST /refresh         - Recarga el reporte desde el directorio de datos");
    println!("  POST /upload          - Multipart .xlsx/.xls; el procesamiento es simulado");
    println!("  GET  /help            - Describe la API con ejemplos en JSON");
    println!();
    println!("Nota: el directorio de datos se resuelve con DASH_DATA_DIR o ./data; se lee processed_data.json o, si falta, data.json (filas crudas).");

    run_server(&bind).await
}
