//! # Reference Scenario
//!
//! The hokey-pokey acceptance run, driven through the demo harness.

#[cfg(test)]
mod tests {
    use bus_demo::{
        drain_steps, post_steps, Dancers, HOKEY_POKEY, LEFT_FOOT_IN, LEFT_FOOT_OUT, SHAKE_IT,
    };
    use priority_bus::{Bus, PriorityClass};

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scenario_step_by_step() {
        let bus: Bus<String> = Bus::new();
        let dancers = Dancers::new();
        dancers.register(&bus);

        post_steps(&bus).unwrap();
        assert_eq!(dancers.two.received(), owned(&[HOKEY_POKEY]));
        assert_eq!(dancers.three.received(), owned(&[HOKEY_POKEY]));
        assert!(dancers.one.received().is_empty());

        bus.drain_all(PriorityClass::High);
        assert_eq!(
            dancers.one.received(),
            owned(&[LEFT_FOOT_IN, LEFT_FOOT_OUT, LEFT_FOOT_IN])
        );
        assert_eq!(dancers.three.received(), owned(&[HOKEY_POKEY, LEFT_FOOT_OUT]));

        bus.drain_all(PriorityClass::Medium);
        assert_eq!(dancers.two.received(), owned(&[HOKEY_POKEY, SHAKE_IT]));

        bus.drain_all(PriorityClass::Low);
        assert_eq!(
            dancers.three.received(),
            owned(&[HOKEY_POKEY, LEFT_FOOT_OUT, LEFT_FOOT_OUT])
        );
        assert_eq!(bus.total_pending(), 0);
    }

    #[test]
    fn test_drain_steps_reports_each_class() {
        let bus: Bus<String> = Bus::new();
        Dancers::new().register(&bus);
        post_steps(&bus).unwrap();

        let summaries = drain_steps(&bus);
        let classes: Vec<PriorityClass> = summaries.iter().map(|s| s.class).collect();
        assert_eq!(
            classes,
            vec![PriorityClass::High, PriorityClass::Medium, PriorityClass::Low]
        );
    }

    #[test]
    fn test_stats_serialize() {
        let bus: Bus<String> = Bus::new();
        Dancers::new().register(&bus);
        post_steps(&bus).unwrap();
        drain_steps(&bus);

        let json = serde_json::to_value(bus.stats()).unwrap();
        assert_eq!(json["posted"], 6);
        assert_eq!(json["processed"], 6);
        assert_eq!(json["pending"], 0);
    }
}
