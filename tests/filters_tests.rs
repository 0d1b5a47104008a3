use rankboard::dashboard::filters::{
    FilterCriteria, PerformanceFilter, ProgressBucket, StatusFilter, apply_all_filters,
    classify_progress, group_passes, list_departments,
};
use rankboard::models::{Detail, Group, Indicator};

fn detail(departamento: Option<&str>, status: Option<&str>) -> Detail {
    Detail {
        departamento: departamento.map(|s| s.to_string()),
        status: status.map(|s| s.to_string()),
        ..Detail::default()
    }
}

fn group(name: &str, percentage: f64, details: Vec<Detail>) -> Group {
    Group {
        name: name.to_string(),
        total_atingida: percentage,
        total_maxima: 100.0,
        percentage,
        indicators: vec![Indicator {
            name: format!("{}-ind", name),
            total_atingida: percentage,
            total_maxima: 100.0,
            percentage,
            details,
        }],
    }
}

fn performance_criteria(performance: PerformanceFilter) -> FilterCriteria {
    FilterCriteria {
        performance,
        ..FilterCriteria::default()
    }
}

#[test]
fn test_classify_progress_bordes() {
    assert_eq!(classify_progress(0.0), ProgressBucket::Zero);
    assert_eq!(classify_progress(0.1), ProgressBucket::Low);
    assert_eq!(classify_progress(30.0), ProgressBucket::Low);
    assert_eq!(classify_progress(30.1), ProgressBucket::Medium);
    assert_eq!(classify_progress(70.0), ProgressBucket::Medium);
    assert_eq!(classify_progress(70.1), ProgressBucket::High);
    assert_eq!(classify_progress(99.99), ProgressBucket::High);
    assert_eq!(classify_progress(100.0), ProgressBucket::Perfect);
}

#[test]
fn test_clasificacion_y_filtro_consistentes() {
    // la banda mostrada y la banda que acepta el filtro deben coincidir
    // para cualquier porcentaje del dominio
    // incluye valores fuera de [0,100]: el JSON procesado puede traer el
    // campo `percentage` directamente
    let muestras = [
        -5.0, 0.0, 0.5, 15.0, 30.0, 30.5, 50.0, 70.0, 70.5, 85.0, 99.9, 100.0, 120.0,
    ];
    for pct in muestras {
        let bucket = classify_progress(pct);
        let filtro = match bucket {
            ProgressBucket::Zero => PerformanceFilter::Zero,
            ProgressBucket::Low => PerformanceFilter::Low,
            ProgressBucket::Medium => PerformanceFilter::Medium,
            ProgressBucket::High => PerformanceFilter::High,
            ProgressBucket::Perfect => PerformanceFilter::Perfect,
        };
        let g = group("G", pct, vec![detail(None, None)]);
        assert!(
            group_passes(&g, &performance_criteria(filtro)),
            "porcentaje {} clasificado {:?} pero el filtro no lo acepta",
            pct,
            bucket
        );
    }
}

#[test]
fn test_porcentajes_fuera_de_rango_saturan() {
    // porcentajes suministrados fuera de [0,100] saturan en la banda más
    // cercana, tanto en la clasificación como en el filtro
    assert_eq!(classify_progress(-5.0), ProgressBucket::Zero);
    assert_eq!(classify_progress(120.0), ProgressBucket::Perfect);

    let negativo = group("Negativo", -5.0, vec![detail(None, None)]);
    assert!(group_passes(&negativo, &performance_criteria(PerformanceFilter::Zero)));
    assert!(!group_passes(&negativo, &performance_criteria(PerformanceFilter::Low)));

    let saturado = group("Saturado", 120.0, vec![detail(None, None)]);
    assert!(group_passes(&saturado, &performance_criteria(PerformanceFilter::Perfect)));
    assert!(!group_passes(&saturado, &performance_criteria(PerformanceFilter::High)));
}

#[test]
fn test_filtro_performance_medium_y_high() {
    // Escenario: G1 con percentage 70 cae en (30,70] -> medium lo incluye,
    // high lo excluye
    let g1 = group("G1", 70.0, vec![detail(Some("Sales"), Some("Ativo"))]);
    let groups = vec![g1];

    let medium = apply_all_filters(&groups, &performance_criteria(PerformanceFilter::Medium));
    assert_eq!(medium.len(), 1);
    assert_eq!(medium[0].name, "G1");

    let high = apply_all_filters(&groups, &performance_criteria(PerformanceFilter::High));
    assert!(high.is_empty());
}

#[test]
fn test_filtro_performance_perfect_y_zero() {
    let groups = vec![
        group("Completo", 100.0, vec![detail(None, None)]),
        group("Vacio", 0.0, vec![detail(None, None)]),
    ];

    let perfect = apply_all_filters(&groups, &performance_criteria(PerformanceFilter::Perfect));
    assert_eq!(perfect.len(), 1);
    assert_eq!(perfect[0].name, "Completo");

    let zero = apply_all_filters(&groups, &performance_criteria(PerformanceFilter::Zero));
    assert_eq!(zero.len(), 1);
    assert_eq!(zero[0].name, "Vacio");
}

#[test]
fn test_filtro_status_inactive_excluye_grupo_todo_ativo() {
    // todos los detalles son "Ativo": el filtro inactive lo excluye entero
    let g = group(
        "G1",
        50.0,
        vec![detail(None, Some("Ativo")), detail(None, Some("Ativo"))],
    );
    let criteria = FilterCriteria {
        status: StatusFilter::Inactive,
        ..FilterCriteria::default()
    };
    assert!(apply_all_filters(&[g], &criteria).is_empty());
}

#[test]
fn test_filtro_status_case_insensitive() {
    let g = group("G1", 50.0, vec![detail(None, Some("ATIVO"))]);
    let criteria = FilterCriteria {
        status: StatusFilter::Active,
        ..FilterCriteria::default()
    };
    assert_eq!(apply_all_filters(&[g], &criteria).len(), 1);
}

#[test]
fn test_filtro_departamento_sensible_a_mayusculas() {
    let groups = vec![group("G1", 50.0, vec![detail(Some("Sales"), None)])];

    let exacto = FilterCriteria {
        department: "Sales".to_string(),
        ..FilterCriteria::default()
    };
    assert_eq!(apply_all_filters(&groups, &exacto).len(), 1);

    // a diferencia del status, el departamento compara exacto
    let minusculas = FilterCriteria {
        department: "sales".to_string(),
        ..FilterCriteria::default()
    };
    assert!(apply_all_filters(&groups, &minusculas).is_empty());
}

#[test]
fn test_filtros_combinados_and_logico() {
    let groups = vec![
        group("A", 50.0, vec![detail(Some("Sales"), Some("Ativo"))]),
        group("B", 50.0, vec![detail(Some("Sales"), Some("Inativo"))]),
        group("C", 90.0, vec![detail(Some("Sales"), Some("Ativo"))]),
        group("D", 50.0, vec![detail(Some("Ops"), Some("Ativo"))]),
    ];
    let criteria = FilterCriteria {
        status: StatusFilter::Active,
        department: "Sales".to_string(),
        performance: PerformanceFilter::Medium,
    };

    let view = apply_all_filters(&groups, &criteria);
    // sólo A pasa los tres filtros a la vez
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].name, "A");

    // propiedad: todo grupo excluido falla al menos un predicado
    for g in &groups {
        if !view.iter().any(|v| v.name == g.name) {
            assert!(!group_passes(g, &criteria));
        }
    }
}

#[test]
fn test_filtro_preserva_orden_y_es_subconjunto() {
    let groups = vec![
        group("Z", 40.0, vec![detail(None, Some("Ativo"))]),
        group("A", 10.0, vec![detail(None, Some("Ativo"))]),
        group("M", 60.0, vec![detail(None, Some("Ativo"))]),
    ];
    let criteria = performance_criteria(PerformanceFilter::Medium);
    let view = apply_all_filters(&groups, &criteria);

    assert!(view.len() <= groups.len());
    // Z (40) y M (60) pasan; el orden del reporte se conserva, no se
    // reordena alfabéticamente
    assert_eq!(view.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(), vec!["Z", "M"]);
}

#[test]
fn test_criterios_all_equivalen_a_sin_filtro() {
    let groups = vec![
        group("A", 0.0, vec![detail(Some("X"), Some("Inativo"))]),
        group("B", 100.0, vec![detail(Some("Y"), Some("Ativo"))]),
    ];
    let view = apply_all_filters(&groups, &FilterCriteria::default());
    assert_eq!(view.len(), groups.len());
    assert_eq!(view[0].name, "A");
    assert_eq!(view[1].name, "B");
}

#[test]
fn test_list_departments_ordenado_sin_duplicados() {
    let groups = vec![
        group(
            "A",
            10.0,
            vec![
                detail(Some("Vendas"), None),
                detail(Some("Compras"), None),
                detail(Some(""), None),
            ],
        ),
        group("B", 20.0, vec![detail(Some("Vendas"), None), detail(None, None)]),
    ];

    let deps = list_departments(&groups);
    assert_eq!(deps, vec!["all", "Compras", "Vendas"]);
}

#[test]
fn test_list_departments_sin_grupos() {
    // sin datos sigue existiendo el centinela
    let deps = list_departments(&[]);
    assert_eq!(deps, vec!["all"]);
}
