//! Haplopar is a pure parsimony haplotyping solver.
//!
//! Given a sample of binary haplotypes, the genotypes obtained by pairing
//! consecutive strands are ambiguous at the sites where the two strands
//! disagree.
//! This crate searches for the smallest set of haplotypes able to explain
//! every genotype of the sample, by reducing each candidate set size to a
//! Boolean satisfiability problem and binary searching on this size.

#![warn(missing_docs)]

pub mod encodings;

pub mod genetics;

pub mod io;

pub mod sat;

pub mod solvers;
