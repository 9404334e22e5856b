//! Loading a set of TypeScript sources into one analyzable program.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use path_clean::PathClean;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::decl::{Decl, DeclId, ImportBinding};
use crate::error::{Result, TsError};
use crate::lower::lower_program;
use crate::options::DiscoveryOptions;

/// Extensions tried, in order, when an import specifier has none.
const EXTENSIONS: &[&str] = &[".ts", ".tsx", ".d.ts", ".mts", ".cts"];

/// Index files tried when an import specifier names a directory.
const INDEX_FILES: &[&str] = &["index.ts", "index.tsx", "index.d.ts"];

/// One parsed source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Normalized path, as given to the program.
    pub path: PathBuf,
    /// The path without its extension, used to qualify type identities.
    pub module_name: String,
    /// Declarations at file scope, in source order.
    pub top_level: Vec<DeclId>,
    /// Local name to import binding.
    pub imports: FxHashMap<String, ImportBinding>,
    /// Whether this is a `.d.ts` file.
    pub is_declaration: bool,
}

/// A TypeScript program: every declaration of every file, in one arena.
#[derive(Debug, Clone)]
pub struct TsProgram {
    pub(crate) files: Vec<SourceFile>,
    pub(crate) decls: Vec<Decl>,
    by_path: FxHashMap<PathBuf, usize>,
    pub(crate) options: DiscoveryOptions,
}

impl TsProgram {
    /// Build a program from in-memory `(path, source)` pairs.
    ///
    /// Paths only need to be consistent with each other: relative imports
    /// are resolved against them without touching the filesystem.
    pub fn from_sources<I, P, S>(sources: I, options: DiscoveryOptions) -> Result<Self>
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<PathBuf>,
        S: AsRef<str>,
    {
        let mut program = Self {
            files: Vec::new(),
            decls: Vec::new(),
            by_path: FxHashMap::default(),
            options,
        };
        for (path, source) in sources {
            program.add_source(path.into().clean(), source.as_ref())?;
        }
        Ok(program)
    }

    /// Read and parse each file in `paths`.
    pub fn from_paths<I, P>(paths: I, options: DiscoveryOptions) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut sources = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let source = std::fs::read_to_string(path).map_err(|error| TsError::Io {
                path: path.to_path_buf(),
                error,
            })?;
            sources.push((path.to_path_buf(), source));
        }
        Self::from_sources(sources, options)
    }

    fn add_source(&mut self, path: PathBuf, source: &str) -> Result<()> {
        let source_type = SourceType::from_path(&path)
            .map_err(|_| TsError::UnsupportedFile { path: path.clone() })?;

        let allocator = Allocator::default();
        let parser_return = Parser::new(&allocator, source, source_type).parse();
        if !parser_return.errors.is_empty() {
            let diagnostics: Vec<String> =
                parser_return.errors.iter().map(|error| error.to_string()).collect();
            return Err(TsError::parse_error(path, &diagnostics));
        }

        let file = self.files.len();
        let lowered = lower_program(&parser_return.program, source, file, &mut self.decls);
        debug!(
            path = %path.display(),
            declarations = lowered.top_level.len(),
            imports = lowered.imports.len(),
            "lowered source file"
        );

        self.by_path.insert(path.clone(), file);
        self.files.push(SourceFile {
            module_name: module_name(&path),
            is_declaration: source_type.is_typescript_definition(),
            path,
            top_level: lowered.top_level,
            imports: lowered.imports,
        });
        Ok(())
    }

    /// All files, in load order.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// The declaration behind `id`.
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.0]
    }

    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    /// Files walked during discovery.
    pub(crate) fn walked_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files
            .iter()
            .filter(|file| !file.is_declaration || self.options.include_declaration_files)
    }

    /// Resolve a relative import specifier to a file of this program.
    pub(crate) fn resolve_module(&self, from_file: usize, specifier: &str) -> Option<usize> {
        if !specifier.starts_with("./") && !specifier.starts_with("../") {
            return None;
        }
        let base = self.files[from_file].path.parent().unwrap_or(Path::new(""));
        let candidate = base.join(specifier).clean();

        let mut attempts = vec![candidate.clone()];
        // `./foo.js` names the compiled output of `./foo.ts`.
        if matches!(
            candidate.extension().and_then(|ext| ext.to_str()),
            Some("js" | "mjs" | "cjs" | "jsx")
        ) {
            attempts.push(candidate.with_extension(""));
        }
        let stems = attempts.clone();
        for stem in &stems {
            attempts.extend(EXTENSIONS.iter().map(|ext| with_suffix(stem, ext)));
        }
        attempts.extend(INDEX_FILES.iter().map(|index| candidate.join(index)));

        attempts
            .iter()
            .find_map(|attempt| self.by_path.get(attempt).copied())
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut text = OsString::from(path.as_os_str());
    text.push(suffix);
    PathBuf::from(text)
}

fn module_name(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    for suffix in [".d.ts", ".d.mts", ".d.cts"] {
        if let Some(stem) = text.strip_suffix(suffix) {
            return stem.to_string();
        }
    }
    match text.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') && !stem.is_empty() && !stem.ends_with('/') => {
            stem.to_string()
        }
        _ => text,
    }
}
