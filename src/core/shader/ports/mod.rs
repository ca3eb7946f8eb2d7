pub mod program_linker;
