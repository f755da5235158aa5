//! 边列表导入、开放路线与输出的端到端测试

use postman::cli::Printer;
use postman::{EdgeList, Error, OutputFormat, RunConfig, TourStep};
use std::io::Write;

const RESORT: &str = "\
# 缆车和雪道
Base, Mid, Express Lift, 8, lift
Mid, Top, Upper Lift, 6, lift
Top, Mid, Ridge Run, 4, black
Mid, Base, Meadow Run, 5, green
Top, Base, Canyon Run, 9, blue
";

fn write_edges(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_closed_tour_from_file() {
    let file = write_edges(RESORT);
    let edges = EdgeList::from_path(file.path()).unwrap();
    assert_eq!(edges.vertex_count(), 3);
    assert_eq!(edges.arc_count(), 5);

    let solution = edges.to_postman().unwrap().solve().unwrap();
    // Top 出度 2 入度 1，Base 出度 1 入度 2：需要额外走一次 Base -> Top
    assert_eq!(solution.basic_cost(), 32.0);
    assert_eq!(solution.phi(), 14.0);
    assert_eq!(solution.cost(), 46.0);

    let steps: Vec<TourStep<'_>> = solution.tour(0).unwrap().collect();
    assert_eq!(steps.len(), 7);
    assert_eq!(steps.first().map(|s| s.from), Some(0));
    assert_eq!(steps.last().map(|s| s.to), Some(0));
}

#[test]
fn test_open_tour_ends_elsewhere() {
    let edges = EdgeList::parse(RESORT).unwrap();
    let problem = edges.to_open_postman().unwrap();

    // 从 Top 出发、在 Base 结束时每条路线各走一次即可
    let open = problem.solve_from(2).unwrap();
    assert_eq!(open.start(), 2);
    assert_eq!(open.end(), 0);
    assert_eq!(open.cost(), 32.0);

    let steps: Vec<_> = open.tour().collect();
    assert_eq!(steps.len(), 5);
    assert_eq!(steps.first().map(|s| s.from), Some(2));
    assert_eq!(steps.last().map(|s| s.to), Some(0));
    for pair in steps.windows(2) {
        assert_eq!(pair[0].to, pair[1].from);
    }

    // Base 本身是唯一的亏缺顶点，从它出发只能回到它
    let from_base = problem.solve_from(0).unwrap();
    assert_eq!(from_base.end(), 0);
    assert_eq!(from_base.cost(), 46.0);
}

#[test]
fn test_open_best_start() {
    let edges = EdgeList::parse(RESORT).unwrap();
    let problem = edges.to_open_postman().unwrap();
    let best = problem.solve_best().unwrap();
    assert_eq!(best.start(), 2);
    assert_eq!(best.cost(), 32.0);
    for start in 0..problem.vertex_count() {
        assert!(best.cost() <= problem.solve_from(start).unwrap().cost());
    }
}

#[test]
fn test_open_rejects_negative_cost() {
    let edges = EdgeList::parse("a, b, down, -1, red\nb, a, up, 2, red\n").unwrap();
    assert!(edges.to_postman().is_ok());
    assert!(matches!(
        edges.to_open_postman(),
        Err(Error::NegativeCost { .. })
    ));
}

#[test]
fn test_printer_uses_vertex_names() {
    let edges = EdgeList::parse(RESORT).unwrap();
    let solution = edges.to_postman().unwrap().solve().unwrap();
    let steps: Vec<_> = solution.tour(0).unwrap().collect();

    let config = RunConfig {
        color: false,
        minutes: true,
        ..Default::default()
    };
    let printer = Printer::from_config(&config).with_names(edges.vertex_names());
    let output = printer.print_tour(&steps, solution.cost()).unwrap();

    assert!(output.starts_with("Total time: 0 hour(s) and 46 minute(s)"));
    assert!(output.contains("from Base to Mid"));
    assert_eq!(output.matches("Take ").count(), 7);
}

#[test]
fn test_json_document() {
    let edges = EdgeList::parse(RESORT).unwrap();
    let solution = edges.to_postman().unwrap().solve().unwrap();
    let steps: Vec<_> = solution.tour(0).unwrap().collect();

    let output = Printer::new(OutputFormat::Json)
        .with_names(edges.vertex_names())
        .print_tour(&steps, solution.cost())
        .unwrap();
    let doc: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(doc["cost"], 46.0);
    assert_eq!(doc["steps"].as_array().map(|s| s.len()), Some(7));
    assert_eq!(doc["steps"][0]["from"], "Base");
}

#[test]
fn test_unreachable_vertex_in_file() {
    let edges = EdgeList::parse("a, b, x, 1, red\nb, a, y, 1, red\nc, a, z, 1, red\n").unwrap();
    assert!(matches!(
        edges.to_postman().unwrap().solve(),
        Err(Error::NotStronglyConnected { from: 0, to: 2 })
    ));
}
