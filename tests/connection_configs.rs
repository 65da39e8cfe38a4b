// tests/connection_configs.rs
use glam::IVec2;
use smores_conn::{
    AdjacencyEncoder, CatalogConfig, ConnectionGenerator, Error, GeneratorConfig, Pose,
    PoseAssignment, PoseEnumerator, Shape, SymmetryReducer, catalog,
};

fn shape(list: &[(i32, i32)], symmetry: &str) -> Shape {
    Shape::new(
        list.iter().map(|&(r, c)| IVec2::new(r, c)).collect(),
        symmetry,
    )
    .unwrap()
}

fn poses(values: &[u8]) -> PoseAssignment {
    values
        .iter()
        .map(|&v| Pose::try_from(v).unwrap())
        .collect()
}

fn labels(pairs: &[[&str; 2]]) -> Vec<[String; 2]> {
    pairs
        .iter()
        .map(|[a, b]| [a.to_string(), b.to_string()])
        .collect()
}

const SQUARE: [(i32, i32); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];
const T_TETROMINO: [(i32, i32); 4] = [(0, 0), (0, 1), (0, 2), (1, 1)];
const X_PENTOMINO: [(i32, i32); 5] = [(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)];

#[test]
fn test_domino_worked_example() {
    let domino = shape(&[(0, 0), (0, 1)], "");
    let configs = ConnectionGenerator::default().generate(&domino).unwrap();

    let config = configs
        .iter()
        .find(|c| c.poses == poses(&[0, 1]))
        .expect("trivial symmetry keeps every assignment");
    assert_eq!(config.labels(), labels(&[["0R", "1B"]]));
}

#[test]
fn test_known_encodings() {
    let t = shape(&T_TETROMINO, "");
    let encoder = AdjacencyEncoder::new(&t);
    assert_eq!(
        encoder.encode(&poses(&[0, 1, 2, 3])).unwrap().labels(),
        labels(&[["0R", "1B"], ["1R", "3R"], ["1T", "2R"]])
    );

    let square = shape(&SQUARE, "");
    assert_eq!(
        AdjacencyEncoder::new(&square)
            .encode(&poses(&[3, 2, 1, 0]))
            .unwrap()
            .labels(),
        labels(&[["0L", "2L"], ["0B", "1R"], ["1T", "3T"], ["2T", "3L"]])
    );

    let x = shape(&X_PENTOMINO, "");
    assert_eq!(
        AdjacencyEncoder::new(&x)
            .encode(&poses(&[0, 1, 2, 3, 0]))
            .unwrap()
            .labels(),
        labels(&[["0B", "2B"], ["1T", "2R"], ["2T", "4T"], ["2L", "3T"]])
    );
}

#[test]
fn test_reduction_counts() {
    // Counts under single-generator image checks, in enumeration order.
    let cases: [(&[(i32, i32)], &str, usize); 6] = [
        (&[(0, 0), (0, 1)], "-|%", 10),
        (&[(0, 0), (0, 1), (0, 2)], "-|%", 40),
        (&SQUARE, "-|%@", 70),
        (&SQUARE, "%@", 70),
        (&T_TETROMINO, "|", 160),
        (&X_PENTOMINO, "-|%@", 280),
    ];
    for (cells, symmetry, expected) in cases {
        let s = shape(cells, symmetry);
        let configs = ConnectionGenerator::default().generate(&s).unwrap();
        assert_eq!(configs.len(), expected, "{symmetry:?} on {cells:?}");
    }
}

#[test]
fn test_s_tetromino_half_turn() {
    let s = shape(&[(0, 1), (0, 2), (1, 0), (1, 1)], "%");
    let kept: Vec<_> = SymmetryReducer::new(&s)
        .unwrap()
        .reduce(PoseEnumerator::new(4).unwrap())
        .collect();
    assert_eq!(kept.len(), 136);
    assert_eq!(kept.last(), Some(&poses(&[3, 3, 3, 3])));
}

#[test]
fn test_trivial_symmetry_is_noop() {
    let l = shape(&[(0, 0), (1, 0), (2, 0), (2, 1)], "");
    let configs = ConnectionGenerator::default().generate(&l).unwrap();
    let all: Vec<PoseAssignment> = PoseEnumerator::new(4).unwrap().collect();
    let kept: Vec<PoseAssignment> = configs.into_iter().map(|c| c.poses).collect();
    assert_eq!(kept, all);
}

#[test]
fn test_output_is_ordered_subsequence() {
    let t = shape(&T_TETROMINO, "|");
    let configs = ConnectionGenerator::default().generate(&t).unwrap();
    let mut all = PoseEnumerator::new(4).unwrap();
    for config in &configs {
        assert!(all.any(|a| a == config.poses));
        assert_eq!(config.len(), 3);
    }
}

#[test]
fn test_deterministic_json() {
    let x = shape(&X_PENTOMINO, "-|%@");
    let generator = ConnectionGenerator::new(GeneratorConfig::default());
    let first = serde_json::to_string(&generator.generate(&x).unwrap()).unwrap();
    let second = serde_json::to_string(&generator.generate(&x).unwrap()).unwrap();
    assert_eq!(first, second);
    assert!(first.starts_with(r#"[{"poses":[0,0,0,0,0],"connections":[["0B","2T"]"#));
}

#[test]
fn test_single_cell_has_no_connections() {
    let mono = shape(&[(0, 0)], "-|%@");
    let configs = ConnectionGenerator::default().generate(&mono).unwrap();
    // A 1x1 grid is its own image under every generator, but each pose is new.
    assert_eq!(configs.len(), 4);
    assert!(configs.iter().all(|c| c.is_empty()));
}

#[test]
fn test_pentomino_catalog_default_filters() {
    let shapes = catalog(&CatalogConfig::default()).unwrap();
    // I, T and X remain: the only symmetric pentominoes that are straight or branched.
    assert_eq!(shapes.len(), 3);
    for s in &shapes {
        let configs = ConnectionGenerator::default().generate(s).unwrap();
        assert!(!configs.is_empty());
        assert!(configs.len() <= 4usize.pow(5));
    }
}

#[test]
fn test_unrecognized_label_aborts() {
    let s = shape(&SQUARE, "-+");
    assert!(matches!(
        ConnectionGenerator::default().generate(&s),
        Err(Error::UnrecognizedSymmetryLabel { ch: '+', .. })
    ));
}

#[test]
fn test_malformed_json_shape_is_an_error() {
    // Cell (0, 5) lies outside the stated 1x2 box.
    let json = r#"{"cells":[[0,0],[0,5]],"height":1,"width":2,"symmetry":"|"}"#;
    assert!(serde_json::from_str::<Shape>(json).is_err());

    let shifted = r#"{"cells":[[1,0],[1,1],[1,2],[2,1],[3,1]],"symmetry":"|"}"#;
    assert!(serde_json::from_str::<Shape>(shifted).is_err());
}
