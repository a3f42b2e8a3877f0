mod intrusive;
