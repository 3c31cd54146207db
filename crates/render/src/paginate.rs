//! Groups a flat node list into sections that each start on a fresh page.

use feedback_pdf_markdown::Node;

/// Sections longer than this are split into consecutive chunks.
pub const MAX_NODES_PER_SECTION: usize = 50;

fn starts_section(node: &Node) -> bool {
    matches!(node.heading_depth(), Some(1 | 2))
}

/// Splits `nodes` before every depth-1 or depth-2 heading, then caps each
/// section at [`MAX_NODES_PER_SECTION`] nodes.
///
/// Concatenating the result yields `nodes` again and no section is empty.
/// A heading that lands last in a chunk stays there.
pub fn paginate(nodes: &[Node]) -> Vec<&[Node]> {
    let mut sections = Vec::new();
    let mut start = 0;
    for (i, node) in nodes.iter().enumerate() {
        if starts_section(node) && i > start {
            sections.push(&nodes[start..i]);
            start = i;
        }
    }
    if start < nodes.len() {
        sections.push(&nodes[start..]);
    }

    let chunks: Vec<&[Node]> = sections
        .into_iter()
        .flat_map(|section| section.chunks(MAX_NODES_PER_SECTION))
        .collect();
    debug_assert!(chunks.iter().all(|c| !c.is_empty()));
    log::debug!("Paginated {} nodes into {} sections", nodes.len(), chunks.len());
    chunks
}
