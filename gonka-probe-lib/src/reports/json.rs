use crate::Result;
use crate::records::Snapshot;
use core::fmt::Write;

/// Write the snapshot as pretty-printed JSON. Non-ASCII text is written verbatim.
pub fn generate<W: Write>(snapshot: &Snapshot, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(snapshot)?)?;
    Ok(())
}
