//! Build a tree over four leaves, prove one, and verify it
//!
//! ```bash
//! cargo run -p merkle-core --example fruit_proof
//! ```

use merkle_core::{verify_proof, MerkleTree};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let leaves = ["apple", "banana", "cherry", "date"];
    let tree = MerkleTree::build(leaves)?;
    println!("Merkle root: {}", tree.root());

    let proof = tree.proof_for("apple")?;
    println!("Proof of apple:\n{}", proof.to_json_pretty()?);

    let is_verified = verify_proof("apple", &proof, &tree.root());
    println!("Is apple verified: {}", is_verified);

    Ok(())
}
