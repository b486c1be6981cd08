use intake_core::config::IntakeConfig;
use intake_core::fields;
use intake_core::models::field::Field;
use intake_gdt::wrap::wrap;
use intake_questionnaire::flatten::SectionBlock;

/// Opens every block.
pub const BLOCK_RULE: &str = "---";

/// Underlines the block title.
pub const TITLE_RULE: &str = "========";

const BULLET_PREFIX: &str = "- ";
const BULLET_INDENT: &str = "  ";

/// Render one block as encoded text-block values.
///
/// Layout:
/// - `---`
/// - the title, wrapped
/// - `========`
/// - each bullet wrapped, first line `- `, continuation lines indented
///
/// Every value fits `config.max_line_bytes` in `config.charset`.
pub fn render_block(block: &SectionBlock, config: &IntakeConfig) -> Vec<Vec<u8>> {
    let budget = config.max_line_bytes;
    let charset = config.charset;

    let mut lines = wrap(BLOCK_RULE, budget, "", "", charset);
    lines.extend(wrap(&block.title, budget, "", "", charset));
    lines.extend(wrap(TITLE_RULE, budget, "", "", charset));
    for bullet in &block.bullets {
        lines.extend(wrap(bullet, budget, BULLET_PREFIX, BULLET_INDENT, charset));
    }
    lines
}

/// All blocks as text-block fields, in order.
pub fn render_blocks(blocks: &[SectionBlock], config: &IntakeConfig) -> Vec<Field> {
    blocks
        .iter()
        .flat_map(|block| render_block(block, config))
        .map(|value| Field::new(fields::TEXT_BLOCK, value))
        .collect()
}
