use std::{path::Path, sync::Arc};

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

/// Parse a TypeScript or JavaScript module.
///
/// JavaScript is parsed with the TSX grammar. `.ts`/`.mts`/`.cts` files are
/// parsed without JSX so angle-bracket casts keep working.
pub fn parse_source(code: String, file_path: &Path) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    let source_map: Arc<SourceMap> = Default::default();

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(
            FileName::Real(file_path.to_path_buf()).into(),
            code,
        );

        let mut parser = Parser::new(
            syntax_for(file_path),
            StringInput::from(&*source_file),
            None,
        );

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("syntax error: {:?}", e))?;

        Ok(ParsedSource {
            module,
            source_map: source_map.clone(),
        })
    })
}

fn syntax_for(file_path: &Path) -> Syntax {
    match file_path.extension().and_then(|e| e.to_str()) {
        Some("ts" | "mts" | "cts") => Syntax::Typescript(TsSyntax {
            tsx: false,
            ..Default::default()
        }),
        _ => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
    }
}
