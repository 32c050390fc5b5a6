//! Examples of using the token trie
use token_trie::{Key, Ranking, Trie, DEFAULT_MAX_CANDIDATES};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Character mode: one token per character
    let mut words = Trie::<char, u32>::new();
    for (word, weight) in &[("cat", 10), ("car", 7), ("cow", 3), ("cart", 2)] {
        let key: Vec<char> = word.chars().collect();
        words.insert(&key, *weight)?;
    }

    assert_eq!(words.get(&['c', 'a', 't'])?, &10);
    assert!(!words.contains(&['c', 'a']));
    assert_eq!(words.len(), 4);

    // Keys made of characters come back joined
    assert_eq!(words.keys()[0], Key::Joined("car".to_string()));

    for prediction in words.predict(&['c', 'a'], DEFAULT_MAX_CANDIDATES) {
        println!(
            "ca + {} -> weight {:?}, {} completions",
            prediction.token(),
            prediction.weight(),
            prediction.size()
        );
    }

    // Rank by the best word reachable through each token instead
    let best: Vec<char> = words
        .predict_with(&['c'], DEFAULT_MAX_CANDIDATES, Ranking::BestCompletion)
        .iter()
        .map(|p| *p.token())
        .collect();
    assert_eq!(best, vec!['a', 'o']);

    words.remove(&['c', 'o', 'w'])?;
    words.dump(&mut std::io::stdout())?;

    Ok(())
}
