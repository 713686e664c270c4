use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use sigpatch_analysis::Fingerprint;
use sigpatch_model::modifiers::describe;
use sigpatch_model::{ClassId, Program, TypeDesc};
use sigpatch_patches::{PatchConfig, RunOptions, builtin};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "sigpatch", about = "Signature-driven bytecode patcher")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show package and size of a model listing
    Info {
        /// Path to the YAML model listing
        input: PathBuf,
    },
    /// Print a smali-like listing of every method
    Disasm {
        /// Path to the YAML model listing
        input: PathBuf,
        /// Only this class (type descriptor, e.g. Lcom/example/Foo;)
        #[arg(long)]
        class: Option<String>,
    },
    /// List every method whose string constants include all the given strings
    Match {
        /// Path to the YAML model listing
        input: PathBuf,
        /// Required string literals
        #[arg(required = true)]
        strings: Vec<String>,
    },
    /// List the built-in patches
    List,
    /// Run the built-in patches over a model listing
    Patch {
        /// Path to the YAML model listing
        input: PathBuf,
        /// Output path for the patched listing (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Heuristic parameters (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Run only the named patch (repeatable)
        #[arg(long = "only")]
        only: Vec<String>,
        /// Run patches even if the package is not a compatible one
        #[arg(long)]
        ignore_compatibility: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input } => cmd_info(&input),
        Commands::Disasm { input, class } => cmd_disasm(&input, class.as_deref()),
        Commands::Match { input, strings } => cmd_match(&input, strings),
        Commands::List => cmd_list(),
        Commands::Patch {
            input,
            output,
            config,
            only,
            ignore_compatibility,
        } => cmd_patch(
            &input,
            output.as_deref(),
            config.as_deref(),
            &only,
            ignore_compatibility,
        ),
    }
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

fn load(path: &Path) -> Program {
    Program::open(path).unwrap_or_else(|e| fail(e))
}

fn cmd_info(path: &Path) {
    let program = load(path);
    let classes = program.classes();
    let methods = program.methods().count();
    let bodyless = program.methods().filter(|(_, m)| m.body.is_none()).count();
    let fields: usize = classes.iter().map(|c| c.fields.len()).sum();
    let instructions: usize = program.methods().map(|(_, m)| m.instructions().len()).sum();

    println!("=== Model Info ===");
    println!("Package:          {}", program.package().unwrap_or("(unknown)"));
    println!("Classes:          {}", classes.len());
    println!("Fields:           {fields}");
    println!("Methods:          {methods} ({bodyless} without body)");
    println!("Instructions:     {instructions}");
}

fn cmd_disasm(path: &Path, only: Option<&str>) {
    let program = load(path);
    match only {
        Some(ty) => match program.class_by_type(&TypeDesc::new(ty)) {
            Some((id, _)) => disasm_class(&program, id),
            None => fail(format!("no class {ty}")),
        },
        None => program.class_ids().for_each(|id| disasm_class(&program, id)),
    }
}

fn flags(bits: u32) -> String {
    let names = describe(bits);
    if names.is_empty() {
        format!("{bits:#x}")
    } else {
        names.join(" ")
    }
}

fn disasm_class(program: &Program, id: ClassId) {
    let Some(class) = program.class(id) else {
        return;
    };
    println!(".class {} {}", flags(class.access_flags), class.ty);
    if let Some(sup) = &class.super_class {
        println!(".super {sup}");
    }
    for field in &class.fields {
        println!(".field {} {}:{}", flags(field.access_flags), field.name, field.ty);
    }
    println!();

    for (_, method) in program.class_methods(id) {
        println!(
            ".method {} {}{}",
            flags(method.access_flags),
            method.name,
            method.reference(&class.ty).descriptor()
        );
        match &method.body {
            None => println!("    # (no code - native or abstract)"),
            Some(body) => {
                println!("    .registers {} # ins: {}", body.registers, body.ins);
                for (pos, insn) in body.instructions().iter().enumerate() {
                    println!("    {pos:04}  {insn}");
                }
            }
        }
        println!(".end method");
        println!();
    }
}

fn cmd_match(path: &Path, strings: Vec<String>) {
    let program = load(path);
    let fingerprint = Fingerprint::new("cli", strings);
    let mut found = 0;
    for m in fingerprint.find_all(&program) {
        if let Some(method) = program.method_ref(m.method) {
            println!("{method}");
            found += 1;
        }
    }
    if found == 0 {
        println!("# no match");
    }
}

fn cmd_list() {
    for patch in builtin::all() {
        println!("{}", patch.name());
        println!("    {}", patch.description());
        println!("    compatible with: {}", patch.compatible_packages().join(", "));
    }
}

fn cmd_patch(
    input: &Path,
    output: Option<&Path>,
    config: Option<&Path>,
    only: &[String],
    ignore_compatibility: bool,
) {
    let mut program = load(input);
    let config = match config {
        Some(path) => PatchConfig::open(path).unwrap_or_else(|e| fail(e)),
        None => PatchConfig::default(),
    };
    let patches = sigpatch_patches::select(builtin::all(), only).unwrap_or_else(|e| fail(e));
    let options = RunOptions {
        ignore_compatibility,
    };

    let report =
        sigpatch_patches::run(&mut program, &patches, &config, options).unwrap_or_else(|e| fail(e));
    eprintln!("{report}");

    match output {
        Some(path) => {
            program.save(path).unwrap_or_else(|e| fail(e));
            log::info!("wrote {}", path.display());
        }
        None => match program.to_yaml() {
            Ok(text) => print!("{text}"),
            Err(e) => fail(e),
        },
    }
}
