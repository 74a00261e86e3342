use serde::Serialize;

pub const NODE_WIDTH: f64 = 140.0;
pub const NODE_HEIGHT: f64 = 56.0;
const LAYER_GAP: f64 = 80.0;
const SIBLING_GAP: f64 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    TopDown,
    BottomUp,
    LeftRight,
    RightLeft,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Rectangle,
    Rounded,
    Diamond,
    Circle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub shape: Shape,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub arrow: bool,
    pub dashed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Diagram {
    pub direction: Direction,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Diagram {
    fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    fn upsert_node(&mut self, id: &str, shaped: Option<(String, Shape)>) {
        match (self.node_index(id), shaped) {
            (Some(index), Some((label, shape))) => {
                self.nodes[index].label = label;
                self.nodes[index].shape = shape;
            }
            (Some(_), None) => {}
            (None, shaped) => {
                let (label, shape) = shaped.unwrap_or_else(|| (id.to_string(), Shape::Rectangle));
                self.nodes.push(Node {
                    id: id.to_string(),
                    label,
                    shape,
                });
            }
        }
    }
}

pub fn parse(source: &str) -> Result<Diagram, String> {
    let mut lines = source
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with("%%"));

    let (header_line, header) = lines.next().ok_or("empty diagram")?;
    let direction = parse_header(header).map_err(|err| format!("line {header_line}: {err}"))?;
    let mut diagram = Diagram {
        direction,
        nodes: Vec::new(),
        edges: Vec::new(),
    };

    let mut open_subgraphs = 0usize;
    for (number, line) in lines {
        for statement in line.split(';').map(str::trim).filter(|part| !part.is_empty()) {
            let keyword = statement.split_whitespace().next().unwrap_or_default();
            match keyword {
                "subgraph" => open_subgraphs += 1,
                "end" => {
                    open_subgraphs = open_subgraphs
                        .checked_sub(1)
                        .ok_or_else(|| format!("line {number}: `end` without `subgraph`"))?;
                }
                "direction" | "classDef" | "class" | "style" | "linkStyle" | "click" => {}
                _ => parse_statement(statement, &mut diagram)
                    .map_err(|err| format!("line {number}: {err}"))?,
            }
        }
    }
    if open_subgraphs > 0 {
        return Err("unclosed `subgraph`, expected `end`".to_string());
    }

    if diagram.nodes.is_empty() {
        return Err("diagram has no nodes".to_string());
    }
    Ok(diagram)
}

fn parse_header(header: &str) -> Result<Direction, String> {
    let mut words = header.split_whitespace();
    match words.next() {
        Some("graph") | Some("flowchart") => {}
        Some(other) => return Err(format!("unsupported diagram type `{other}`")),
        None => return Err("missing diagram type".to_string()),
    }
    match words.next() {
        None | Some("TD") | Some("TB") => Ok(Direction::TopDown),
        Some("BT") => Ok(Direction::BottomUp),
        Some("LR") => Ok(Direction::LeftRight),
        Some("RL") => Ok(Direction::RightLeft),
        Some(other) => Err(format!("unknown direction `{other}`")),
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn take_until(&mut self, close: &str) -> Option<&'a str> {
        let rest = self.rest();
        let end = rest.find(close)?;
        self.pos += end + close.len();
        Some(&rest[..end])
    }

    fn eat_run(&mut self, ch: char) -> usize {
        let run = self.rest().chars().take_while(|&next| next == ch).count();
        self.pos += run * ch.len_utf8();
        run
    }

    fn is_done(&self) -> bool {
        self.pos >= self.text.len()
    }
}

fn parse_statement(statement: &str, diagram: &mut Diagram) -> Result<(), String> {
    let mut cursor = Cursor {
        text: statement,
        pos: 0,
    };
    let mut previous = parse_group(&mut cursor, diagram)?;
    loop {
        cursor.skip_whitespace();
        if cursor.is_done() {
            return Ok(());
        }
        let (label, arrow, dashed) = parse_link(&mut cursor)?;
        cursor.skip_whitespace();
        let next = parse_group(&mut cursor, diagram)?;
        for from in &previous {
            for to in &next {
                diagram.edges.push(Edge {
                    from: from.clone(),
                    to: to.clone(),
                    label: label.clone(),
                    arrow,
                    dashed,
                });
            }
        }
        previous = next;
    }
}

// `A & B --> C` links every node on one side to every node on the other.
fn parse_group(cursor: &mut Cursor<'_>, diagram: &mut Diagram) -> Result<Vec<String>, String> {
    let mut ids = vec![parse_node(cursor, diagram)?];
    loop {
        let mark = cursor.pos;
        cursor.skip_whitespace();
        if !cursor.eat("&") {
            cursor.pos = mark;
            return Ok(ids);
        }
        cursor.skip_whitespace();
        ids.push(parse_node(cursor, diagram)?);
    }
}

fn parse_node(cursor: &mut Cursor<'_>, diagram: &mut Diagram) -> Result<String, String> {
    let rest = cursor.rest();
    let id_len = rest
        .find(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
        .unwrap_or(rest.len());
    if id_len == 0 {
        return Err(format!("expected node id near `{}`", rest.trim()));
    }
    let id = rest[..id_len].to_string();
    cursor.pos += id_len;

    let shaped = if cursor.eat("((") {
        Some((shape_label(cursor, "))")?, Shape::Circle))
    } else if cursor.eat("[") {
        Some((shape_label(cursor, "]")?, Shape::Rectangle))
    } else if cursor.eat("{") {
        Some((shape_label(cursor, "}")?, Shape::Diamond))
    } else if cursor.eat("(") {
        Some((shape_label(cursor, ")")?, Shape::Rounded))
    } else {
        None
    };
    diagram.upsert_node(&id, shaped);
    Ok(id)
}

fn shape_label(cursor: &mut Cursor<'_>, close: &str) -> Result<String, String> {
    let unclosed = || format!("unclosed node shape, expected `{close}`");
    cursor.skip_whitespace();
    if cursor.eat("\"") {
        let text = cursor
            .take_until("\"")
            .ok_or("unclosed quoted label, expected `\"`")?;
        cursor.skip_whitespace();
        return if cursor.eat(close) {
            Ok(text.trim().to_string())
        } else {
            Err(unclosed())
        };
    }
    let raw = cursor.take_until(close).ok_or_else(unclosed)?;
    Ok(raw.trim().to_string())
}

// Solid links are two or more `-` (`=` for thick ones) ending in `>` for an
// arrow, or three or more without it. Dotted links are `-.->` and `-.-`.
// Text may sit inside the link (`-- yes -->`, `-. maybe .->`, `== go ==>`)
// or after it between pipes.
fn parse_link(cursor: &mut Cursor<'_>) -> Result<(Option<String>, bool, bool), String> {
    let near = cursor.rest().trim().to_string();
    let invalid = || format!("expected link near `{near}`");

    let (inline, arrow, dashed) = if cursor.eat("-.") {
        cursor.eat_run('.');
        if cursor.eat("->") {
            (None, true, true)
        } else if cursor.eat("-") {
            (None, false, true)
        } else {
            let text = cursor
                .take_until(".-")
                .ok_or("unterminated edge label, expected `.->`")?;
            cursor.eat_run('-');
            (Some(text), cursor.eat(">"), true)
        }
    } else {
        let stroke = match cursor.rest().chars().next() {
            Some(ch @ ('-' | '=')) => ch,
            _ => return Err(invalid()),
        };
        let run = cursor.eat_run(stroke);
        if run < 2 {
            return Err(invalid());
        }
        if cursor.eat(">") {
            (None, true, false)
        } else if run >= 3 {
            (None, false, false)
        } else {
            let closing = if stroke == '-' { "--" } else { "==" };
            let text = cursor
                .take_until(closing)
                .ok_or_else(|| format!("unterminated edge label, expected `{closing}>`"))?;
            cursor.eat_run(stroke);
            (Some(text), cursor.eat(">"), false)
        }
    };
    if let Some(text) = inline {
        return Ok((Some(text.trim().to_string()).filter(|text| !text.is_empty()), arrow, dashed));
    }

    cursor.skip_whitespace();
    let label = if cursor.eat("|") {
        let text = cursor
            .take_until("|")
            .ok_or("unclosed edge label, expected `|`")?;
        Some(text.trim().to_string()).filter(|text| !text.is_empty())
    } else {
        None
    };
    Ok((label, arrow, dashed))
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedNode {
    pub node: Node,
    pub x: f64,
    pub y: f64,
}

impl PlacedNode {
    pub fn center(&self) -> (f64, f64) {
        (self.x + NODE_WIDTH / 2.0, self.y + NODE_HEIGHT / 2.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<Edge>,
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn find(&self, id: &str) -> Option<&PlacedNode> {
        self.nodes.iter().find(|placed| placed.node.id == id)
    }
}

/// Longest-path layering. Cycles stop relaxing after one pass per node.
pub fn layers(diagram: &Diagram) -> Vec<usize> {
    let count = diagram.nodes.len();
    let mut rank = vec![0usize; count];
    for _ in 0..count {
        let mut changed = false;
        for edge in &diagram.edges {
            let (Some(from), Some(to)) = (diagram.node_index(&edge.from), diagram.node_index(&edge.to))
            else {
                continue;
            };
            if from != to && rank[to] < rank[from] + 1 {
                rank[to] = rank[from] + 1;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    rank.iter_mut().for_each(|value| *value = (*value).min(count.saturating_sub(1)));
    rank
}

pub fn layout(diagram: &Diagram) -> Layout {
    let rank = layers(diagram);
    let depth = rank.iter().copied().max().unwrap_or(0);
    let mut slot_in_layer = vec![0usize; depth + 1];
    let mut widest = 0usize;
    let mut nodes = Vec::with_capacity(diagram.nodes.len());

    for (index, node) in diagram.nodes.iter().enumerate() {
        let layer = rank[index];
        let slot = slot_in_layer[layer];
        slot_in_layer[layer] += 1;
        widest = widest.max(slot + 1);

        let layer = match diagram.direction {
            Direction::BottomUp | Direction::RightLeft => depth - layer,
            Direction::TopDown | Direction::LeftRight => layer,
        };
        let along = layer as f64;
        let across = slot as f64;
        let (x, y) = match diagram.direction {
            Direction::TopDown | Direction::BottomUp => (
                across * (NODE_WIDTH + SIBLING_GAP),
                along * (NODE_HEIGHT + LAYER_GAP),
            ),
            Direction::LeftRight | Direction::RightLeft => (
                along * (NODE_WIDTH + LAYER_GAP),
                across * (NODE_HEIGHT + SIBLING_GAP),
            ),
        };
        nodes.push(PlacedNode {
            node: node.clone(),
            x,
            y,
        });
    }

    let layers_count = (depth + 1) as f64;
    let widest = widest.max(1) as f64;
    let (width, height) = match diagram.direction {
        Direction::TopDown | Direction::BottomUp => (
            widest * NODE_WIDTH + (widest - 1.0) * SIBLING_GAP,
            layers_count * NODE_HEIGHT + (layers_count - 1.0) * LAYER_GAP,
        ),
        Direction::LeftRight | Direction::RightLeft => (
            layers_count * NODE_WIDTH + (layers_count - 1.0) * LAYER_GAP,
            widest * NODE_HEIGHT + (widest - 1.0) * SIBLING_GAP,
        ),
    };

    Layout {
        nodes,
        edges: diagram.edges.clone(),
        width,
        height,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneElement {
    Rectangle {
        id: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        text: String,
        rounded: bool,
    },
    Diamond {
        id: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        text: String,
    },
    Ellipse {
        id: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        text: String,
    },
    Arrow {
        id: String,
        start: String,
        end: String,
        points: [[f64; 2]; 2],
        label: Option<String>,
        dashed: bool,
        #[serde(rename = "endArrowhead")]
        end_arrowhead: Option<&'static str>,
    },
}

impl SceneElement {
    fn bottom(&self) -> f64 {
        match self {
            SceneElement::Rectangle { y, height, .. }
            | SceneElement::Diamond { y, height, .. }
            | SceneElement::Ellipse { y, height, .. } => y + height,
            SceneElement::Arrow { points, .. } => points[0][1].max(points[1][1]),
        }
    }
}

pub fn scene_elements(layout: &Layout, prefix: &str, offset_y: f64) -> Vec<SceneElement> {
    let mut elements = Vec::with_capacity(layout.nodes.len() + layout.edges.len());
    for placed in &layout.nodes {
        let id = format!("{prefix}-{}", placed.node.id);
        let (x, y) = (placed.x, placed.y + offset_y);
        let text = placed.node.label.clone();
        elements.push(match placed.node.shape {
            Shape::Rectangle | Shape::Rounded => SceneElement::Rectangle {
                id,
                x,
                y,
                width: NODE_WIDTH,
                height: NODE_HEIGHT,
                text,
                rounded: placed.node.shape == Shape::Rounded,
            },
            Shape::Diamond => SceneElement::Diamond {
                id,
                x,
                y,
                width: NODE_WIDTH,
                height: NODE_HEIGHT,
                text,
            },
            Shape::Circle => SceneElement::Ellipse {
                id,
                x,
                y,
                width: NODE_WIDTH,
                height: NODE_HEIGHT,
                text,
            },
        });
    }
    for (index, edge) in layout.edges.iter().enumerate() {
        let (Some(from), Some(to)) = (layout.find(&edge.from), layout.find(&edge.to)) else {
            continue;
        };
        let (x1, y1) = from.center();
        let (x2, y2) = to.center();
        elements.push(SceneElement::Arrow {
            id: format!("{prefix}-edge-{index}"),
            start: format!("{prefix}-{}", edge.from),
            end: format!("{prefix}-{}", edge.to),
            points: [[x1, y1 + offset_y], [x2, y2 + offset_y]],
            label: edge.label.clone(),
            dashed: edge.dashed,
            end_arrowhead: edge.arrow.then_some("arrow"),
        });
    }
    elements
}

pub fn scene_bottom(elements: &[SceneElement]) -> f64 {
    elements.iter().map(SceneElement::bottom).fold(0.0, f64::max)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppState<'a> {
    view_background_color: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SceneExport<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    version: u32,
    source: &'a str,
    elements: &'a [SceneElement],
    app_state: AppState<'a>,
}

pub fn export_json(elements: &[SceneElement]) -> Result<String, String> {
    let export = SceneExport {
        kind: "excalidraw",
        version: 2,
        source: "calidraw",
        elements,
        app_state: AppState {
            view_background_color: "#121212",
        },
    };
    serde_json::to_string_pretty(&export).map_err(|err| format!("export failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "graph TD
    A[Start] --> B{Is it working?}
    B -- Yes --> C[Great!]
    B -- No --> D[Debug]";

    #[test]
    fn parses_starter_flowchart() {
        let diagram = parse(SAMPLE).unwrap();
        assert_eq!(diagram.direction, Direction::TopDown);
        let labels: Vec<_> = diagram.nodes.iter().map(|node| node.label.as_str()).collect();
        assert_eq!(labels, vec!["Start", "Is it working?", "Great!", "Debug"]);
        assert_eq!(diagram.nodes[1].shape, Shape::Diamond);
        assert_eq!(
            diagram.edges[1],
            Edge {
                from: "B".to_string(),
                to: "C".to_string(),
                label: Some("Yes".to_string()),
                arrow: true,
                dashed: false,
            }
        );
    }

    #[test]
    fn parses_chains_pipes_and_shapes() {
        let diagram =
            parse("flowchart LR\n  a((Hub)) -->|ping| b(Worker) --- c\n  c -.-> a; d==>a").unwrap();
        assert_eq!(diagram.direction, Direction::LeftRight);
        assert_eq!(diagram.nodes.len(), 4);
        assert_eq!(diagram.nodes[0].shape, Shape::Circle);
        assert_eq!(diagram.nodes[1].shape, Shape::Rounded);
        assert_eq!(diagram.nodes[2].label, "c");
        assert_eq!(diagram.edges.len(), 4);
        assert_eq!(diagram.edges[0].label.as_deref(), Some("ping"));
        assert!(!diagram.edges[1].arrow);
        assert!(diagram.edges[2].dashed);
        assert_eq!(diagram.edges[3].from, "d");
    }

    #[test]
    fn long_dotted_and_thick_links() {
        let diagram = parse(
            "graph TD\nA ---> B\nB ---- C\nC -.- D\nD -. maybe .-> E\nE == go ==> F\nF ====> A",
        )
        .unwrap();
        let links: Vec<_> = diagram
            .edges
            .iter()
            .map(|edge| (edge.label.as_deref(), edge.arrow, edge.dashed))
            .collect();
        assert_eq!(
            links,
            vec![
                (None, true, false),
                (None, false, false),
                (None, false, true),
                (Some("maybe"), true, true),
                (Some("go"), true, false),
                (None, true, false),
            ]
        );
    }

    #[test]
    fn ampersand_groups_fan_out() {
        let diagram = parse("graph LR\nA & B --> C & D").unwrap();
        let pairs: Vec<_> = diagram
            .edges
            .iter()
            .map(|edge| (edge.from.as_str(), edge.to.as_str()))
            .collect();
        assert_eq!(pairs, vec![("A", "C"), ("A", "D"), ("B", "C"), ("B", "D")]);
    }

    #[test]
    fn quoted_labels_may_contain_brackets() {
        let diagram = parse("graph TD\nA[\"items[0]\"] --> B(\"call()\")").unwrap();
        assert_eq!(diagram.nodes[0].label, "items[0]");
        assert_eq!(diagram.nodes[1].label, "call()");
        assert_eq!(diagram.nodes[1].shape, Shape::Rounded);
    }

    #[test]
    fn subgraphs_keep_their_nodes() {
        let diagram = parse(
            "flowchart TB\nsubgraph api [API]\n  direction LR\n  G --> S\nend\nS --> DB\nstyle DB fill:#f9f",
        )
        .unwrap();
        let ids: Vec<_> = diagram.nodes.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(ids, vec!["G", "S", "DB"]);
        assert_eq!(diagram.edges.len(), 2);
        assert_eq!(
            parse("graph TD\nsubgraph one\nA --> B").unwrap_err(),
            "unclosed `subgraph`, expected `end`"
        );
        assert_eq!(
            parse("graph TD\nA --> B\nend").unwrap_err(),
            "line 3: `end` without `subgraph`"
        );
    }

    #[test]
    fn later_shape_overrides_bare_reference() {
        let diagram = parse("graph TD\nA --> B\nB[Build]").unwrap();
        assert_eq!(diagram.nodes[1].label, "Build");
    }

    #[test]
    fn errors_carry_line_numbers() {
        assert_eq!(
            parse("graph TD\nA --> B\nC[oops").unwrap_err(),
            "line 3: unclosed node shape, expected `]`"
        );
        assert_eq!(
            parse("sequenceDiagram\nA->>B: hi").unwrap_err(),
            "line 1: unsupported diagram type `sequenceDiagram`"
        );
        assert_eq!(parse("  \n").unwrap_err(), "empty diagram");
        assert!(parse("graph TD\nA ~~ B").unwrap_err().starts_with("line 2: expected link"));
        assert_eq!(parse("graph TD\nA - B").unwrap_err(), "line 2: expected link near `- B`");
    }

    #[test]
    fn layers_follow_longest_path() {
        let diagram = parse("graph TD\nA --> B --> C\nA --> C\nD").unwrap();
        assert_eq!(layers(&diagram), vec![0, 1, 2, 0]);
        let cyclic = parse("graph TD\nA --> B --> A").unwrap();
        assert!(layers(&cyclic).iter().all(|&rank| rank <= 1));
    }

    #[test]
    fn layout_positions_by_direction() {
        let diagram = parse(SAMPLE).unwrap();
        let placed = layout(&diagram);
        let c = placed.find("C").unwrap();
        let d = placed.find("D").unwrap();
        assert_eq!((c.x, c.y), (0.0, 2.0 * (NODE_HEIGHT + LAYER_GAP)));
        assert_eq!(d.x, NODE_WIDTH + SIBLING_GAP);
        assert_eq!(placed.width, 2.0 * NODE_WIDTH + SIBLING_GAP);

        let sideways = layout(&parse("graph RL\nA --> B").unwrap());
        assert_eq!(sideways.find("A").unwrap().x, NODE_WIDTH + LAYER_GAP);
        assert_eq!(sideways.find("B").unwrap().x, 0.0);
    }

    #[test]
    fn export_stacks_and_serializes() {
        let placed = layout(&parse("graph TD\nA --> B").unwrap());
        let first = scene_elements(&placed, "m1", 0.0);
        let bottom = scene_bottom(&first);
        assert_eq!(bottom, 2.0 * NODE_HEIGHT + LAYER_GAP);

        let json: serde_json::Value = serde_json::from_str(&export_json(&first).unwrap()).unwrap();
        assert_eq!(json["type"], "excalidraw");
        assert_eq!(json["appState"]["viewBackgroundColor"], "#121212");
        assert_eq!(json["elements"][0]["type"], "rectangle");
        assert_eq!(json["elements"][2]["type"], "arrow");
        assert_eq!(json["elements"][2]["start"], "m1-A");
        assert_eq!(json["elements"][2]["endArrowhead"], "arrow");
    }
}
