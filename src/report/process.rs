//! Agregación de filas crudas en el reporte anidado.
//!
//! Cada fila cruda trae grupo, indicador y pontuaciones; aquí se
//! acumulan totales por grupo y por indicador (en orden de primera
//! aparición), se calculan porcentajes redondeados a 2 decimales y se
//! deriva el rango general.

use std::collections::HashMap;

use crate::models::{Detail, Group, Indicator, OverallRank, RawRecord, Report};

/// Rango general a partir de la pontuación total alcanzada.
pub fn calculate_rank(score: f64) -> OverallRank {
    if (900.0..=1000.0).contains(&score) {
        OverallRank::Bluebelt
    } else if (800.0..900.0).contains(&score) {
        OverallRank::Premium
    } else if (700.0..800.0).contains(&score) {
        OverallRank::Advanced
    } else {
        OverallRank::Standard
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Porcentaje con denominador protegido: 0 si la máxima no es positiva.
fn percentage_of(atingida: f64, maxima: f64) -> f64 {
    if maxima > 0.0 {
        atingida / maxima * 100.0
    } else {
        0.0
    }
}

/// Agrega las filas crudas en el reporte anidado. Los grupos e
/// indicadores conservan el orden de primera aparición en la entrada.
pub fn process_records(records: Vec<RawRecord>) -> Report {
    let mut total_atingida = 0.0_f64;
    let mut total_maxima = 0.0_f64;

    let mut groups: Vec<Group> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    // índice de indicadores por grupo, paralelo a `groups`
    let mut indicator_index: Vec<HashMap<String, usize>> = Vec::new();

    for record in records {
        let grupo = record.grupo.clone().unwrap_or_default();
        let indicador = record.indicador.clone().unwrap_or_default();
        let atingida = record.pontuacao_atingida.unwrap_or(0.0);
        let maxima = record.pontuacao_maxima.unwrap_or(0.0);

        total_atingida += atingida;
        total_maxima += maxima;

        let gi = *group_index.entry(grupo.clone()).or_insert_with(|| {
            groups.push(Group {
                name: grupo.clone(),
                total_atingida: 0.0,
                total_maxima: 0.0,
                percentage: 0.0,
                indicators: Vec::new(),
            });
            indicator_index.push(HashMap::new());
            groups.len() - 1
        });

        let group = &mut groups[gi];
        group.total_atingida += atingida;
        group.total_maxima += maxima;

        let ii = *indicator_index[gi].entry(indicador.clone()).or_insert_with(|| {
            group.indicators.push(Indicator {
                name: indicador.clone(),
                total_atingida: 0.0,
                total_maxima: 0.0,
                percentage: 0.0,
                details: Vec::new(),
            });
            group.indicators.len() - 1
        });

        let indicator = &mut group.indicators[ii];
        indicator.total_atingida += atingida;
        indicator.total_maxima += maxima;
        indicator.details.push(Detail {
            grupo: Some(grupo),
            sub_grupo: record.sub_grupo,
            departamento: record.departamento,
            sub_categoria: record.sub_categoria,
            status: record.status,
            pontuacao_atingida: Some(atingida),
            pontuacao_maxima: Some(maxima),
        });
    }

    for group in groups.iter_mut() {
        group.percentage = round2(percentage_of(group.total_atingida, group.total_maxima));
        for indicator in group.indicators.iter_mut() {
            indicator.percentage =
                round2(percentage_of(indicator.total_atingida, indicator.total_maxima));
        }
    }

    Report {
        overall_score: round2(total_atingida),
        overall_max_score: round2(total_maxima),
        overall_percentage: round2(percentage_of(total_atingida, total_maxima)),
        overall_rank: calculate_rank(total_atingida),
        groups,
    }
}
