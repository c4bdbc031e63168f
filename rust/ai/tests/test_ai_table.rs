use bloodgamble_ai::create_ai;
use bloodgamble_ai::personality::roll_temperament;
use bloodgamble_engine::controller::Controllers;
use bloodgamble_engine::round::play_hand;
use bloodgamble_engine::table::{Table, TableConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn ai_seats() -> Controllers<'static> {
    std::array::from_fn(|id| create_ai("personality", &format!("AI {id}")).expect("known AI type"))
}

#[test]
fn ai_only_table_never_stalls_and_conserves_hp() {
    for seed in 0..10u64 {
        let mut table = Table::new(seed, TableConfig::default());
        let mut rng = StdRng::seed_from_u64(seed);
        for id in 0..4 {
            table.seat_mut(id).set_temperament(roll_temperament(&mut rng));
        }
        let mut seats = ai_seats();
        let total: u32 = table.seats().iter().map(|s| s.hp()).sum();
        for _ in 0..40 {
            if table.is_game_over() {
                break;
            }
            let record = play_hand(&mut table, &mut seats).expect("hand plays out");
            assert_eq!(record.winners.iter().map(|p| p.amount).sum::<u32>(), record.pot);
            assert_eq!(record.hp_after.iter().sum::<u32>(), total);
        }
    }
}

#[test]
fn ai_decisions_are_reproducible() {
    let run = |seed| {
        let mut table = Table::new(seed, TableConfig::default());
        let mut seats = ai_seats();
        let mut actions = Vec::new();
        for _ in 0..5 {
            if table.is_game_over() {
                break;
            }
            actions.push(play_hand(&mut table, &mut seats).expect("hand plays out").actions);
        }
        actions
    };
    assert_eq!(run(17), run(17));
}
