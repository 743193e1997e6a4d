//! TypeScript language extractor using text patterns

use super::LanguageExtractor;
use super::javascript::{ARROW_COMPONENT_PATTERN, CLASS_PATTERN, EXPORT_PATTERN, IMPORT_PATTERN};
use crate::classifier;
use crate::patterns::{ComponentMerge, PatternRule, ScriptPatterns};
use anyhow::Result;
use codectx_core::{Language, Module};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static TYPESCRIPT_PATTERNS: LazyLock<ScriptPatterns> = LazyLock::new(|| ScriptPatterns {
    language: Language::TypeScript,
    imports: PatternRule::new("import", IMPORT_PATTERN),
    exports: PatternRule::new("export", EXPORT_PATTERN),
    // Generic functions open with `<` instead of `(`.
    functions: PatternRule::new("function", r"(?:export\s+)?(?:async\s+)?function\s+(\w+)\s*[<\(]"),
    arrow_functions: PatternRule::new(
        "arrow function",
        r"(?:export\s+)?(?:const|let|var)\s+(\w+)\s*[:=]\s*(?:[^=]*)?=>\s*\{",
    ),
    classes: PatternRule::new("class", CLASS_PATTERN),
    components: vec![
        PatternRule::new("typed component", r"(?:export\s+)?(?:const|function)\s+(\w+)\s*:\s*React\.FC"),
        PatternRule::new("arrow component", ARROW_COMPONENT_PATTERN),
    ],
    component_merge: ComponentMerge::Union,
});

/// Pattern-based extractor for `.ts` and `.tsx` files.
#[derive(Debug, Default)]
pub struct TypeScriptExtractor;

impl LanguageExtractor for TypeScriptExtractor {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn accepts(&self, rel_path: &Path) -> bool {
        !classifier::should_skip(rel_path) && !classifier::is_declaration_file(rel_path)
    }

    fn extract(&self, rel_path: &str, content: &[u8]) -> Result<Option<Module>> {
        let source_code = std::str::from_utf8(content)?;
        let module = TYPESCRIPT_PATTERNS.extract(rel_path, source_code);

        if let Some(module) = &module {
            debug!(
                "{}: {} components, {} functions, {} classes",
                rel_path,
                module.components.len(),
                module.functions.len(),
                module.classes.len()
            );
        }

        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(nodes: &[codectx_core::Node]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_extract_typescript() {
        let code = r#"
import { UserService } from './services/user';
import type { User } from './types';

export interface Props { name: string }

export const Greeting: React.FC<Props> = ({ name }) => {
  return <h1>{name}</h1>;
};

export function useUser<T>(id: string): T | undefined {
  return undefined;
}

export const loadUser = async (id: string): Promise<User> => {
  return service.find(id);
};

export class UserController {}
"#;
        let module = TypeScriptExtractor
            .extract("src/components/Greeting.tsx", code.as_bytes())
            .unwrap()
            .unwrap();

        assert_eq!(module.id, "src_components_Greetingx");
        assert_eq!(module.language, Some(Language::TypeScript));
        assert_eq!(module.imports, vec!["./services/user", "./types"]);
        assert_eq!(
            module.exports,
            vec!["Props", "Greeting", "useUser", "loadUser", "UserController"]
        );
        assert_eq!(names(&module.functions), vec!["useUser", "loadUser"]);
        assert_eq!(names(&module.classes), vec!["UserController"]);
        assert_eq!(names(&module.components), vec!["Greeting"]);
    }

    #[test]
    fn test_components_are_unioned_by_name() {
        let code = "export const Panel: React.FC = () => {\n  return null;\n};\n";
        let module = TypeScriptExtractor.extract("Panel.tsx", code.as_bytes()).unwrap().unwrap();
        assert_eq!(names(&module.components), vec!["Panel"]);
    }

    #[test]
    fn test_type_only_file_yields_nothing() {
        let code = "export interface User { id: string }\nexport type Id = string;\n";
        let result = TypeScriptExtractor.extract("types.ts", code.as_bytes()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_declaration_files_are_not_accepted() {
        assert!(!TypeScriptExtractor.accepts(Path::new("types/global.d.ts")));
        assert!(!TypeScriptExtractor.accepts(Path::new("dist/index.ts")));
        assert!(TypeScriptExtractor.accepts(Path::new("src/index.ts")));
    }
}
