// minic: C-subset front end — token listing, symbol table, and AST dump

mod parser;
mod symtab;

use std::fs;
use std::path::Path;

use parser::lexer::Lexer;
use parser::parse::Parser;
use parser::pretty;
use symtab::SymbolTable;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("minic");
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} <file.c>", program_name);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} demos/example.c", program_name);
        std::process::exit(1);
    }

    let input_file = &args[1];

    if !Path::new(input_file).exists() {
        eprintln!("Error: File '{}' not found", input_file);
        std::process::exit(1);
    }

    let source = match fs::read_to_string(input_file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Failed to read '{}': {}", input_file, e);
            std::process::exit(1);
        }
    };

    let tokens = match Lexer::new(&source).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!(">>> TOKENS <<<");
    println!("{:<20} | VALUE", "KIND");
    println!("{}", "-".repeat(40));
    for token in &tokens {
        if token.kind == parser::lexer::TokenKind::Eof {
            continue;
        }
        println!("{:<20} | {}", token.kind.tag(), token.text);
    }

    let table = SymbolTable::from_tokens(&tokens);

    println!();
    println!(">>> SYMBOL TABLE <<<");
    println!("Symbols found: {}", table.len());
    println!("{}", "-".repeat(50));
    println!("{:<10} | {:<20} | CATEGORY", "ORDER", "SYMBOL");
    println!("{}", "-".repeat(50));
    for symbol in table.symbols() {
        println!(
            "{:<10} | {:<20} | {}",
            symbol.order, symbol.name, symbol.category
        );
    }

    let mut parser = Parser::from_tokens(tokens);
    let unit = match parser.parse_translation_unit() {
        Ok(unit) => unit,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!(">>> AST <<<");
    println!("{}", pretty::render(&unit));
}
